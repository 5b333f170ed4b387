//! Plain text views of panels and results.
//!
//! Every view is a small wrapper implementing [`fmt::Display`], so the shell
//! can `println!` it and tests can compare against `to_string()`.

use std::fmt;

use crate::analysis::{DetectionResult, FrameStatus, GapAnalysis, RangeAnalysis};
use crate::gaps::MissingRange;
use crate::panel::{Notification, NotificationLevel, Panel, PanelResult};

const GRID_COLUMNS: usize = 10;
const BAR_WIDTH: usize = 20;

/// Page title and banner.
pub struct PageHeader;

impl fmt::Display for PageHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Video Frame Detective ===")?;
        writeln!(f, "Missing frame detection for numbered frame sequences")?;
        write!(f, "[Real-time Detection] [Advanced Analytics]")
    }
}

/// Tab strip with the active panel marked.
pub struct TabBar(pub Panel);

impl fmt::Display for TabBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = Panel::ALL
            .iter()
            .map(|&p| {
                if p == self.0 {
                    format!("[*{}*]", p.title())
                } else {
                    format!("[ {} ]", p.title())
                }
            })
            .collect();
        writeln!(f, "{}", labels.join(" "))?;
        write!(f, "{}", self.0.description())
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
        };
        write!(f, "[{}] {}: {}", tag, self.title, self.description)
    }
}

/// `#` filled share bar of fixed width.
pub fn share_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn join_frames(frames: &[u64]) -> String {
    frames
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Grid of every frame in `1..=max`.
///
/// Received frames print as `[n]`, missing ones as `(n)` and frames of the
/// longest range as `<n>`.
pub struct FrameGrid<'a> {
    result: &'a PanelResult,
    limit: u64,
}

impl<'a> FrameGrid<'a> {
    pub fn new(result: &'a PanelResult, limit: u64) -> Self {
        Self { result, limit }
    }
}

impl fmt::Display for FrameGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = self.result.max_frame();
        if max > self.limit {
            return write!(
                f,
                "(frame grid skipped: {} frames exceeds the grid limit of {})",
                max, self.limit
            );
        }
        let width = max.to_string().len();
        let mut row = Vec::with_capacity(GRID_COLUMNS);
        for frame in 1..=max {
            let cell = match self.result.frame_status(frame) {
                FrameStatus::Received => format!("[{:>width$}]", frame),
                FrameStatus::Missing => format!("({:>width$})", frame),
                FrameStatus::LongestGap => format!("<{:>width$}>", frame),
            };
            row.push(cell);
            if row.len() == GRID_COLUMNS {
                writeln!(f, "{}", row.join(" "))?;
                row.clear();
            }
        }
        if !row.is_empty() {
            writeln!(f, "{}", row.join(" "))?;
        }
        write!(f, "[n] received  (n) missing")?;
        if self.result.longest().is_some() {
            write!(f, "  <n> longest gap")?;
        }
        Ok(())
    }
}

/// Full rendering of a panel result.
pub struct ResultView<'a> {
    result: &'a PanelResult,
    grid_limit: u64,
}

impl<'a> ResultView<'a> {
    pub fn new(result: &'a PanelResult, grid_limit: u64) -> Self {
        Self { result, grid_limit }
    }
}

impl fmt::Display for ResultView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result {
            PanelResult::Detection(r) => write_detection(f, r)?,
            PanelResult::Ranges(r) => write_ranges(f, r)?,
            PanelResult::Gaps(r) => write_gaps(f, r)?,
        }
        writeln!(f)?;
        write!(f, "{}", FrameGrid::new(self.result, self.grid_limit))
    }
}

fn write_detection(f: &mut fmt::Formatter<'_>, r: &DetectionResult) -> fmt::Result {
    writeln!(f, "Analysis results")?;
    writeln!(f, "  Received frames: {}", r.input.len())?;
    writeln!(f, "  Missing frames:  {}", r.missing.len())?;
    writeln!(f, "  Success rate:    {:.1}%", r.success_rate())?;
    writeln!(f, "Received: {}", join_frames(&r.input))?;
    if r.missing.is_empty() {
        writeln!(f, "No missing frames")
    } else {
        writeln!(f, "Missing:  {}", join_frames(&r.missing))
    }
}

fn write_range_line(
    f: &mut fmt::Formatter<'_>,
    range: &MissingRange,
    share: f64,
    is_longest: bool,
) -> fmt::Result {
    let extent = if range.is_single() {
        "single missing frame".to_string()
    } else {
        format!("range from {} to {}", range.start(), range.end())
    };
    write!(
        f,
        "  {:<12} {:>4} missing  {} {:>5.1}%  {}",
        range.to_string(),
        range.len(),
        share_bar(share),
        share,
        extent
    )?;
    if is_longest {
        write!(f, "  << longest")?;
    }
    writeln!(f)
}

fn write_ranges(f: &mut fmt::Formatter<'_>, r: &RangeAnalysis) -> fmt::Result {
    writeln!(f, "Range analysis")?;
    writeln!(f, "  Received frames:      {}", r.input.len())?;
    writeln!(f, "  Missing ranges:       {}", r.missing_ranges.len())?;
    writeln!(f, "  Total missing frames: {}", r.total_missing_frames)?;
    writeln!(
        f,
        "  Longest range length: {}",
        r.longest_missing_range.map_or(0, |l| l.len())
    )?;

    if r.missing_ranges.is_empty() {
        return writeln!(f, "No missing ranges");
    }
    writeln!(f, "Missing ranges:")?;
    for range in &r.missing_ranges {
        let is_longest = r.longest_missing_range == Some(*range);
        write_range_line(f, range, r.range_share(range), is_longest)?;
    }
    if let (Some(longest), Some(share)) = (r.longest_missing_range, r.longest_share()) {
        writeln!(f, "Longest missing range:")?;
        writeln!(f, "  Start:  {}", longest.start())?;
        writeln!(f, "  End:    {}", longest.end())?;
        writeln!(f, "  Length: {} frames", longest.len())?;
        writeln!(f, "  Share:  {:.1}%", share)?;
    }
    Ok(())
}

fn write_gaps(f: &mut fmt::Formatter<'_>, r: &GapAnalysis) -> fmt::Result {
    writeln!(f, "Professional gap analysis (hash set, no sort)")?;
    writeln!(f, "  Time complexity:  O(n + max)")?;
    writeln!(f, "  Space complexity: O(n)")?;
    writeln!(f, "  Efficiency:       {:.1}%", r.efficiency())?;
    writeln!(f, "  Data points:      {}", r.input.len())?;
    writeln!(f, "  Gaps found:       {}", r.gaps.len())?;
    writeln!(f, "  Total missing:    {}", r.missing_count)?;
    writeln!(f, "  Longest gap:      {}", r.longest_gap.map_or(0, |l| l.len()))?;

    if r.gaps.is_empty() {
        return writeln!(f, "No gaps found");
    }
    writeln!(f, "Gap details:")?;
    for gap in &r.gaps {
        let is_longest = r.longest_gap == Some(*gap);
        write_range_line(f, gap, r.gap_impact(gap), is_longest)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_bar_widths() {
        assert_eq!(share_bar(0.0), "-".repeat(20));
        assert_eq!(share_bar(100.0), "#".repeat(20));
        assert_eq!(share_bar(50.0), format!("{}{}", "#".repeat(10), "-".repeat(10)));
        assert_eq!(share_bar(250.0), "#".repeat(20));
    }

    #[test]
    fn grid_marks_frames() {
        let result = Panel::Professional.analyze(vec![1, 2, 3, 5, 6, 10, 11, 16]);
        let grid = FrameGrid::new(&result, 500).to_string();
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(
            lines[0],
            "[ 1] [ 2] [ 3] ( 4) [ 5] [ 6] ( 7) ( 8) ( 9) [10]"
        );
        assert_eq!(lines[1], "[11] <12> <13> <14> <15> [16]");
        assert!(lines[2].contains("<n> longest gap"));
    }

    #[test]
    fn grid_respects_limit() {
        let result = Panel::Basic.analyze(vec![1, 1000]);
        let grid = FrameGrid::new(&result, 100).to_string();
        assert!(grid.contains("grid skipped"));
    }

    #[test]
    fn basic_grid_has_no_longest_legend() {
        let result = Panel::Basic.analyze(vec![1, 3]);
        let grid = FrameGrid::new(&result, 100).to_string();
        assert!(grid.starts_with("[1] (2) [3]"));
        assert!(!grid.contains("longest"));
    }

    #[test]
    fn detection_view_lists_missing() {
        let result = Panel::Basic.analyze(vec![1, 2, 3, 5, 6]);
        let text = ResultView::new(&result, 500).to_string();
        assert!(text.contains("Missing frames:  1"));
        assert!(text.contains("Success rate:    83.3%"));
        assert!(text.contains("Missing:  4"));
    }

    #[test]
    fn range_view_marks_longest() {
        let result = Panel::Advanced.analyze(vec![1, 2, 5, 8, 9, 15]);
        let text = ResultView::new(&result, 500).to_string();
        let longest_line = text
            .lines()
            .find(|l| l.contains("[10, 14]"))
            .unwrap();
        assert!(longest_line.contains("<< longest"));
        assert!(longest_line.contains("range from 10 to 14"));
        assert!(text.contains("Share:  55.6%"));
    }

    #[test]
    fn gap_view_single_frame_wording() {
        let result = Panel::Professional.analyze(vec![1, 2, 3, 5, 6, 10, 11, 16]);
        let text = ResultView::new(&result, 500).to_string();
        let line = text.lines().find(|l| l.contains("[4, 4]")).unwrap();
        assert!(line.contains("single missing frame"));
        assert!(text.contains("Efficiency:       50.0%"));
    }

    #[test]
    fn notification_display() {
        let note = Notification::error("Input error", "nothing to analyze");
        assert_eq!(note.to_string(), "[error] Input error: nothing to analyze");
    }

    #[test]
    fn tab_bar_marks_active() {
        let text = TabBar(Panel::Advanced).to_string();
        assert!(text.contains("[*Missing Frame Ranges Analysis*]"));
        assert!(text.contains("[ Detecting Missing Video Frames ]"));
    }
}
