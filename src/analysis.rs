//! Result shapes produced by the three analyzers.
//!
//! Each result is transient: it is built from a parsed frame list, shown,
//! and then replaced or dropped. The percentage helpers feed the summary
//! cards and share bars in [`crate::render`].

use serde::Serialize;

use crate::gaps::{analyze_ranges, analyze_ranges_unsorted, find_missing_frames, MissingRange};

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

fn max_of(frames: &[u64]) -> u64 {
    frames.iter().copied().max().unwrap_or(0)
}

/// How a single frame of `1..=max` shows up in a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Received,
    Missing,
    /// Missing and part of the longest range
    LongestGap,
}

/// Output of the basic detector: individual missing frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    /// Parsed frames, sorted ascending
    pub input: Vec<u64>,
    pub missing: Vec<u64>,
}

impl DetectionResult {
    /// Sort `frames` and list the frames missing from them.
    pub fn from_frames(mut frames: Vec<u64>) -> Self {
        frames.sort_unstable();
        let missing = find_missing_frames(&frames);
        Self {
            input: frames,
            missing,
        }
    }

    pub fn max_frame(&self) -> u64 {
        max_of(&self.input)
    }

    /// Received frames as a share of received plus missing.
    pub fn success_rate(&self) -> f64 {
        let received = self.input.len() as u64;
        percent(received, received + self.missing.len() as u64)
    }

    pub fn frame_status(&self, frame: u64) -> FrameStatus {
        if self.missing.binary_search(&frame).is_ok() {
            FrameStatus::Missing
        } else {
            FrameStatus::Received
        }
    }
}

/// Output of the sort-based range analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeAnalysis {
    /// Parsed frames, sorted ascending
    pub input: Vec<u64>,
    pub missing_ranges: Vec<MissingRange>,
    pub longest_missing_range: Option<MissingRange>,
    pub total_missing_frames: u64,
}

impl RangeAnalysis {
    pub fn from_frames(mut frames: Vec<u64>) -> Self {
        let summary = analyze_ranges(&frames);
        frames.sort_unstable();
        Self {
            input: frames,
            missing_ranges: summary.ranges,
            longest_missing_range: summary.longest,
            total_missing_frames: summary.total_missing,
        }
    }

    pub fn max_frame(&self) -> u64 {
        max_of(&self.input)
    }

    /// Share of all missing frames that falls in `range`.
    pub fn range_share(&self, range: &MissingRange) -> f64 {
        percent(range.len(), self.total_missing_frames)
    }

    /// Share of all missing frames that falls in the longest range.
    pub fn longest_share(&self) -> Option<f64> {
        self.longest_missing_range.map(|r| self.range_share(&r))
    }

    pub fn frame_status(&self, frame: u64) -> FrameStatus {
        status_in_ranges(&self.missing_ranges, self.longest_missing_range, frame)
    }
}

/// Output of the no-sort range analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapAnalysis {
    /// Parsed frames in the order they were typed
    pub input: Vec<u64>,
    pub gaps: Vec<MissingRange>,
    pub longest_gap: Option<MissingRange>,
    pub missing_count: u64,
}

impl GapAnalysis {
    pub fn from_frames(frames: Vec<u64>) -> Self {
        let summary = analyze_ranges_unsorted(&frames);
        Self {
            input: frames,
            gaps: summary.ranges,
            longest_gap: summary.longest,
            missing_count: summary.total_missing,
        }
    }

    pub fn max_frame(&self) -> u64 {
        max_of(&self.input)
    }

    /// Share of the `1..=max` span that was received.
    pub fn efficiency(&self) -> f64 {
        let max = self.max_frame();
        if max == 0 {
            return 0.0;
        }
        100.0 - percent(self.missing_count, max)
    }

    /// Share of all missing frames that falls in `gap`.
    pub fn gap_impact(&self, gap: &MissingRange) -> f64 {
        percent(gap.len(), self.missing_count)
    }

    pub fn frame_status(&self, frame: u64) -> FrameStatus {
        status_in_ranges(&self.gaps, self.longest_gap, frame)
    }
}

// `ranges` is ascending and non-overlapping
fn status_in_ranges(
    ranges: &[MissingRange],
    longest: Option<MissingRange>,
    frame: u64,
) -> FrameStatus {
    if longest.is_some_and(|r| r.contains(frame)) {
        return FrameStatus::LongestGap;
    }
    let idx = ranges.partition_point(|r| r.end() < frame);
    match ranges.get(idx) {
        Some(r) if r.contains(frame) => FrameStatus::Missing,
        _ => FrameStatus::Received,
    }
}
