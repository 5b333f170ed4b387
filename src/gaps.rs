//! Gap discovery over frame number sequences.
//!
//! Every analyzer in the crate goes through [`summarize`] with one of three
//! [`GapStrategy`] implementations:
//!
//! - [`ExpectedScan`] walks the frames in the order given, tracking the next
//!   expected frame. Callers must pass ascending input.
//! - [`SortScan`] sorts a copy first and then runs the expected-frame walk.
//! - [`SetScan`] never sorts. It builds a membership set and scans `1..=max`,
//!   so its cost grows with the largest frame rather than the input length.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Inclusive run of consecutive missing frames.
///
/// Serializes as a two element array `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u64, u64)", into = "(u64, u64)")]
pub struct MissingRange {
    start: u64,
    end: u64,
}

impl MissingRange {
    #[inline]
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of frames covered by the range.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// True when the range covers exactly one frame.
    #[inline]
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn contains(&self, frame: u64) -> bool {
        self.start <= frame && frame <= self.end
    }

    /// Iterate over every frame in the range.
    pub fn frames(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("range start {start} is after its end {end}")]
pub struct ReversedRange {
    pub start: u64,
    pub end: u64,
}

impl TryFrom<(u64, u64)> for MissingRange {
    type Error = ReversedRange;

    #[inline]
    fn try_from((start, end): (u64, u64)) -> Result<Self, Self::Error> {
        if start > end {
            return Err(ReversedRange { start, end });
        }
        Ok(Self { start, end })
    }
}

impl From<MissingRange> for (u64, u64) {
    #[inline]
    fn from(range: MissingRange) -> Self {
        (range.start, range.end)
    }
}

impl fmt::Display for MissingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// A way of finding the missing ranges in a list of frames.
///
/// Implementations return ranges in ascending order, each bounded above by
/// the largest frame in the input.
pub trait GapStrategy {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    fn gaps(&self, frames: &[u64]) -> Vec<MissingRange>;
}

/// Expected-frame walk over frames already sorted ascending.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedScan;

impl GapStrategy for ExpectedScan {
    fn name(&self) -> &'static str {
        "expected-scan"
    }

    fn gaps(&self, frames: &[u64]) -> Vec<MissingRange> {
        let mut ranges = Vec::new();
        let mut expected: u64 = 1;
        for &current in frames {
            if current > expected {
                ranges.push(MissingRange::new(expected, current - 1));
            }
            expected = current.saturating_add(1);
        }
        ranges
    }
}

/// Sorts a copy of the input, then runs [`ExpectedScan`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SortScan;

impl GapStrategy for SortScan {
    fn name(&self) -> &'static str {
        "sort-scan"
    }

    fn gaps(&self, frames: &[u64]) -> Vec<MissingRange> {
        let mut sorted = frames.to_vec();
        sorted.sort_unstable();
        ExpectedScan.gaps(&sorted)
    }
}

/// Membership set plus a linear scan of `1..=max`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetScan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    NotInGap,
    InGap(u64),
}

impl GapStrategy for SetScan {
    fn name(&self) -> &'static str {
        "set-scan"
    }

    fn gaps(&self, frames: &[u64]) -> Vec<MissingRange> {
        let Some(&max) = frames.iter().max() else {
            return Vec::new();
        };
        let present: HashSet<u64> = frames.iter().copied().collect();

        let mut ranges = Vec::new();
        let mut state = ScanState::NotInGap;
        for frame in 1..=max {
            match (present.contains(&frame), state) {
                (false, ScanState::NotInGap) => state = ScanState::InGap(frame),
                (true, ScanState::InGap(start)) => {
                    ranges.push(MissingRange::new(start, frame - 1));
                    state = ScanState::NotInGap;
                }
                _ => {}
            }
        }
        // max is always present, but an open gap still closes at max
        if let ScanState::InGap(start) = state {
            ranges.push(MissingRange::new(start, max));
        }
        ranges
    }
}

/// Missing ranges together with the longest range and the missing total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GapSummary {
    pub ranges: Vec<MissingRange>,
    pub longest: Option<MissingRange>,
    pub total_missing: u64,
}

impl GapSummary {
    /// Build a summary from ranges in discovery order.
    ///
    /// The longest range is replaced only by a strictly longer one, so the
    /// first of several equally long ranges wins.
    pub fn from_ranges(ranges: Vec<MissingRange>) -> Self {
        let mut longest: Option<MissingRange> = None;
        let mut total_missing = 0;
        for range in &ranges {
            total_missing += range.len();
            if longest.is_none_or(|l| range.len() > l.len()) {
                longest = Some(*range);
            }
        }
        Self {
            ranges,
            longest,
            total_missing,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Run `strategy` over `frames` and summarize the result.
pub fn summarize<S: GapStrategy + ?Sized>(strategy: &S, frames: &[u64]) -> GapSummary {
    let summary = GapSummary::from_ranges(strategy.gaps(frames));
    debug!(
        "{}: {} frames in, {} ranges, {} missing",
        strategy.name(),
        frames.len(),
        summary.ranges.len(),
        summary.total_missing
    );
    summary
}

/// Every missing frame between 1 and the last frame of `frames`.
///
/// `frames` must already be sorted ascending.
pub fn find_missing_frames(frames: &[u64]) -> Vec<u64> {
    ExpectedScan
        .gaps(frames)
        .iter()
        .flat_map(MissingRange::frames)
        .collect()
}

/// Missing ranges of an unordered frame list, found by sorting first.
pub fn analyze_ranges(frames: &[u64]) -> GapSummary {
    summarize(&SortScan, frames)
}

/// Missing ranges of an unordered frame list, found without sorting.
pub fn analyze_ranges_unsorted(frames: &[u64]) -> GapSummary {
    summarize(&SetScan, frames)
}
