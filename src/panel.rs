//! The three analysis panels and their per-panel state.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::analysis::{DetectionResult, FrameStatus, GapAnalysis, RangeAnalysis};
use crate::gaps::MissingRange;
use crate::parse::{parse_frame_list_within, DEFAULT_MAX_FRAME};

/// One tab of the shell, each backed by a different analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    /// Individual missing frames
    Basic,
    /// Sort-based range analysis
    Advanced,
    /// Range analysis without sorting
    Professional,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown panel '{0}', expected one of: basic, advanced, professional")]
pub struct ParsePanelError(pub String);

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::Basic, Panel::Advanced, Panel::Professional];

    pub fn key(self) -> &'static str {
        match self {
            Panel::Basic => "basic",
            Panel::Advanced => "advanced",
            Panel::Professional => "professional",
        }
    }

    /// Tab label
    pub fn title(self) -> &'static str {
        match self {
            Panel::Basic => "Detecting Missing Video Frames",
            Panel::Advanced => "Missing Frame Ranges Analysis",
            Panel::Professional => "Find Missing Ranges (No Sort)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Panel::Basic => "Finds the missing frames in a simple numeric sequence.",
            Panel::Advanced => "Groups missing frames into ranges and finds the longest one.",
            Panel::Professional => {
                "Finds missing ranges with a hash set scan, without sorting the input."
            }
        }
    }

    /// Sample input shown when the panel is first opened.
    pub fn default_input(self) -> &'static str {
        match self {
            Panel::Basic => "1,2,3,5,6",
            Panel::Advanced => "1,2,5,8,9,15",
            Panel::Professional => "1,2,3,5,6,10,11,16",
        }
    }

    /// Run this panel's analyzer over already validated frames.
    pub fn analyze(self, frames: Vec<u64>) -> PanelResult {
        match self {
            Panel::Basic => PanelResult::Detection(DetectionResult::from_frames(frames)),
            Panel::Advanced => PanelResult::Ranges(RangeAnalysis::from_frames(frames)),
            Panel::Professional => PanelResult::Gaps(GapAnalysis::from_frames(frames)),
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Panel {
    type Err = ParsePanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Panel::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePanelError(s.to_string()))
    }
}

/// Result held by a panel after a successful analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PanelResult {
    Detection(DetectionResult),
    Ranges(RangeAnalysis),
    Gaps(GapAnalysis),
}

impl PanelResult {
    pub fn input(&self) -> &[u64] {
        match self {
            PanelResult::Detection(r) => &r.input,
            PanelResult::Ranges(r) => &r.input,
            PanelResult::Gaps(r) => &r.input,
        }
    }

    pub fn max_frame(&self) -> u64 {
        match self {
            PanelResult::Detection(r) => r.max_frame(),
            PanelResult::Ranges(r) => r.max_frame(),
            PanelResult::Gaps(r) => r.max_frame(),
        }
    }

    pub fn total_missing(&self) -> u64 {
        match self {
            PanelResult::Detection(r) => r.missing.len() as u64,
            PanelResult::Ranges(r) => r.total_missing_frames,
            PanelResult::Gaps(r) => r.missing_count,
        }
    }

    /// The longest missing range, when the analyzer tracks one.
    pub fn longest(&self) -> Option<MissingRange> {
        match self {
            PanelResult::Detection(_) => None,
            PanelResult::Ranges(r) => r.longest_missing_range,
            PanelResult::Gaps(r) => r.longest_gap,
        }
    }

    pub fn frame_status(&self, frame: u64) -> FrameStatus {
        match self {
            PanelResult::Detection(r) => r.frame_status(frame),
            PanelResult::Ranges(r) => r.frame_status(frame),
            PanelResult::Gaps(r) => r.frame_status(frame),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Short message shown after an analyze action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NotificationLevel::Success
    }
}

fn counted(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

fn success_notification(result: &PanelResult) -> Notification {
    match result {
        PanelResult::Detection(r) => Notification::success(
            "Analysis complete",
            format!("Found {}", counted(r.missing.len(), "missing frame", "missing frames")),
        ),
        PanelResult::Ranges(r) => Notification::success(
            "Analysis complete",
            format!(
                "Found {}",
                counted(r.missing_ranges.len(), "missing range", "missing ranges")
            ),
        ),
        PanelResult::Gaps(r) => Notification::success(
            "Professional analysis complete",
            format!(
                "Found {} using the no-sort hash set scan",
                counted(r.gaps.len(), "gap", "gaps")
            ),
        ),
    }
}

/// Input text and current result of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub panel: Panel,
    pub input: String,
    pub result: Option<PanelResult>,
    /// Frames above this are dropped while parsing
    pub max_frame: u64,
}

impl PanelState {
    pub fn new(panel: Panel, input: impl Into<String>) -> Self {
        Self {
            panel,
            input: input.into(),
            result: None,
            max_frame: DEFAULT_MAX_FRAME,
        }
    }

    pub fn with_max_frame(mut self, max_frame: u64) -> Self {
        self.max_frame = max_frame;
        self
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Parse the current input and run the panel's analyzer.
    ///
    /// On invalid input the previous result is left in place and an error
    /// notification is returned.
    pub fn analyze(&mut self) -> Notification {
        match parse_frame_list_within(&self.input, self.max_frame) {
            Ok(frames) => {
                debug!("{} panel: analyzing {} frames", self.panel, frames.len());
                let result = self.panel.analyze(frames);
                let note = success_notification(&result);
                self.result = Some(result);
                note
            }
            Err(err) => {
                debug!("{} panel: {}", self.panel, err);
                Notification::error("Input error", err.to_string())
            }
        }
    }

    /// Drop the result and empty the input.
    pub fn clear(&mut self) {
        self.result = None;
        self.input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_from_str() {
        assert_eq!("basic".parse::<Panel>().unwrap(), Panel::Basic);
        assert_eq!(" Professional ".parse::<Panel>().unwrap(), Panel::Professional);
        assert_eq!(
            "tabs".parse::<Panel>(),
            Err(ParsePanelError("tabs".to_string()))
        );
    }

    #[test]
    fn panel_keys_round_trip() {
        for panel in Panel::ALL {
            assert_eq!(panel.key().parse::<Panel>().unwrap(), panel);
            assert_eq!(panel.to_string(), panel.key());
        }
    }

    #[test]
    fn counted_pluralizes() {
        assert_eq!(counted(1, "gap", "gaps"), "1 gap");
        assert_eq!(counted(0, "gap", "gaps"), "0 gaps");
    }

    #[test]
    fn clear_resets_state() {
        let mut state = PanelState::new(Panel::Basic, "1,3");
        assert!(state.analyze().is_success());
        assert!(state.result.is_some());
        state.clear();
        assert!(state.result.is_none());
        assert!(state.input.is_empty());
    }
}
