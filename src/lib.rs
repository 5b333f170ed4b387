//! # framegap - Missing Frame Detection Library
//!
//! `framegap` finds the frame numbers missing from a sequence such as the
//! frame indices of a captured video.
//!
//! ## Features
//!
//! - List every missing frame between 1 and the highest frame received
//! - Group missing frames into inclusive ranges and find the longest one
//! - A no-sort variant backed by a hash set membership scan
//! - Lenient parsing of comma separated frame lists
//! - Text rendering of results for terminal front ends
//!
//! ## Example
//!
//! ```
//! use framegap::{analyze_ranges, find_missing_frames, MissingRange};
//!
//! assert_eq!(find_missing_frames(&[1, 2, 3, 5, 6]), vec![4]);
//!
//! let summary = analyze_ranges(&[15, 1, 2, 5, 8, 9]);
//! assert_eq!(summary.longest, Some(MissingRange::new(10, 14)));
//! assert_eq!(summary.total_missing, 9);
//! ```
//!
//! ## Panels
//!
//! The binary hosts three panels that share parsing and rendering. The same
//! flow is available from the library:
//!
//! ```
//! use framegap::{FrameDetective, Panel};
//!
//! let detective = FrameDetective::new();
//! let mut state = detective.panel_state(Panel::Professional);
//! let note = state.analyze();
//! assert!(note.is_success());
//! assert_eq!(state.result.unwrap().total_missing(), 8);
//! ```

pub mod analysis;
pub mod gaps;
pub mod panel;
pub mod parse;
pub mod render;

pub use analysis::{DetectionResult, FrameStatus, GapAnalysis, RangeAnalysis};
pub use gaps::{
    analyze_ranges, analyze_ranges_unsorted, find_missing_frames, summarize, ExpectedScan,
    GapStrategy, GapSummary, MissingRange, ReversedRange, SetScan, SortScan,
};
pub use panel::{
    Notification, NotificationLevel, Panel, PanelResult, PanelState, ParsePanelError,
};
pub use parse::{parse_frame_list, parse_frame_list_within, InputError, DEFAULT_MAX_FRAME};
pub use render::{FrameGrid, PageHeader, ResultView, TabBar};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config json {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("parsing config toml {path}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid default_panel in config")]
    DefaultPanel(#[from] ParsePanelError),
    #[error("grid_limit must be greater than zero")]
    GridLimit,
    #[error("max_frame must be greater than zero")]
    MaxFrame,
}

/// Errors raised by a one-shot [`FrameDetective::report`].
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{title}: {description}")]
    Rejected { title: String, description: String },
    #[error("serializing result")]
    Json(#[from] serde_json::Error),
}

/// Output of a one-shot report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab strip, result view and notification
    #[default]
    Text,
    /// Pretty printed JSON of the result only
    Json,
}

fn default_panel_str() -> String {
    Panel::Basic.key().to_string()
}

fn default_inputs() -> HashMap<String, String> {
    Panel::ALL
        .iter()
        .map(|p| (p.key().to_string(), p.default_input().to_string()))
        .collect()
}

fn default_grid_limit() -> u64 {
    500
}

fn default_max_frame() -> u64 {
    DEFAULT_MAX_FRAME
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Panel opened when the shell starts
    #[serde(default = "default_panel_str")]
    pub default_panel: String,
    /// Initial input text per panel key
    #[serde(default = "default_inputs")]
    pub inputs: HashMap<String, String>,
    /// Largest frame for which the frame grid is drawn
    #[serde(default = "default_grid_limit")]
    pub grid_limit: u64,
    /// Largest frame number accepted from input; larger ones are dropped
    #[serde(default = "default_max_frame")]
    pub max_frame: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_panel: default_panel_str(),
            inputs: default_inputs(),
            grid_limit: default_grid_limit(),
            max_frame: default_max_frame(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a `.json` or `.toml` file.
    ///
    /// Files without a `.toml` extension are read as JSON.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        let config: AppConfig = if is_toml {
            toml::from_str(&text).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?
        };
        config.validate()?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that the config can drive the shell.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.default_panel()?;
        if self.grid_limit == 0 {
            return Err(ConfigError::GridLimit);
        }
        if self.max_frame == 0 {
            return Err(ConfigError::MaxFrame);
        }
        for key in self.inputs.keys() {
            if key.parse::<Panel>().is_err() {
                warn!("ignoring input for unknown panel '{}'", key);
            }
        }
        Ok(())
    }

    pub fn default_panel(&self) -> Result<Panel, ParsePanelError> {
        self.default_panel.parse()
    }

    /// Initial input for `panel`, falling back to the built-in sample.
    pub fn input_for(&self, panel: Panel) -> &str {
        self.inputs
            .get(panel.key())
            .map(String::as_str)
            .unwrap_or_else(|| panel.default_input())
    }
}

/// Entry point tying configuration to the three panels
pub struct FrameDetective {
    config: AppConfig,
    default_panel: Panel,
}

impl Default for FrameDetective {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDetective {
    /// Create a detective with the built-in configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            default_panel: Panel::Basic,
        }
    }

    /// Create a detective with a custom configuration
    pub fn with_config(config: AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let default_panel = config.default_panel()?;
        Ok(Self {
            config,
            default_panel,
        })
    }

    /// Load configuration from a file
    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        Self::with_config(AppConfig::from_path(path)?)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn default_panel(&self) -> Panel {
        self.default_panel
    }

    pub fn grid_limit(&self) -> u64 {
        self.config.grid_limit
    }

    /// Fresh state for `panel` holding its configured initial input.
    pub fn panel_state(&self, panel: Panel) -> PanelState {
        PanelState::new(panel, self.config.input_for(panel))
            .with_max_frame(self.config.max_frame)
    }

    /// Analyze `text` on a fresh `panel` and render it in `format`.
    ///
    /// Invalid input gives [`ReportError::Rejected`] carrying the error
    /// notification.
    pub fn report(
        &self,
        panel: Panel,
        text: &str,
        format: OutputFormat,
    ) -> Result<String, ReportError> {
        let mut state = self.panel_state(panel);
        state.set_input(text);
        let note = state.analyze();
        let Some(result) = state.result.as_ref().filter(|_| note.is_success()) else {
            return Err(ReportError::Rejected {
                title: note.title,
                description: note.description,
            });
        };

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Text => Ok(format!(
                "{}\n\n{}\n\n{}",
                TabBar(panel),
                ResultView::new(result, self.grid_limit()),
                note
            )),
        }
    }

    /// Parse `text` and run `panel`'s analyzer without keeping any state.
    pub fn analyze(&self, panel: Panel, text: &str) -> Result<PanelResult, InputError> {
        let frames = parse_frame_list_within(text, self.config.max_frame)?;
        Ok(panel.analyze(frames))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.default_panel().unwrap(), Panel::Basic);
        assert_eq!(cfg.input_for(Panel::Advanced), "1,2,5,8,9,15");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{"default_panel": "advanced"}"#).unwrap();
        assert_eq!(cfg.grid_limit, 500);
        assert_eq!(cfg.input_for(Panel::Basic), "1,2,3,5,6");
    }

    #[test]
    fn partial_inputs_fall_back_per_panel() {
        let cfg: AppConfig = serde_json::from_str(r#"{"inputs": {"basic": "4,8"}}"#).unwrap();
        assert_eq!(cfg.input_for(Panel::Basic), "4,8");
        assert_eq!(cfg.input_for(Panel::Professional), "1,2,3,5,6,10,11,16");
    }

    #[test]
    fn rejects_unknown_default_panel() {
        let cfg = AppConfig {
            default_panel: "hero".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            FrameDetective::with_config(cfg),
            Err(ConfigError::DefaultPanel(_))
        ));
    }

    #[test]
    fn rejects_zero_grid_limit() {
        let cfg = AppConfig {
            grid_limit: 0,
            ..AppConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::GridLimit)));
    }

    #[test]
    fn max_frame_config_bounds_input() {
        let cfg = AppConfig {
            max_frame: 20,
            ..AppConfig::default()
        };
        let detective = FrameDetective::with_config(cfg).unwrap();
        let mut state = detective.panel_state(Panel::Advanced);
        state.set_input("1, 21, 5");
        assert!(state.analyze().is_success());
        assert_eq!(state.result.unwrap().input(), &[1, 5]);
        assert_eq!(detective.analyze(Panel::Basic, "30, 40"), Err(InputError::Empty));
    }

    #[test]
    fn rejects_zero_max_frame() {
        let cfg = AppConfig {
            max_frame: 0,
            ..AppConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::MaxFrame)));
    }

    #[test]
    fn stateless_analyze() {
        let detective = FrameDetective::new();
        let result = detective.analyze(Panel::Basic, "1,2,3,5,6").unwrap();
        assert_eq!(
            result,
            PanelResult::Detection(DetectionResult {
                input: vec![1, 2, 3, 5, 6],
                missing: vec![4],
            })
        );
        assert_eq!(detective.analyze(Panel::Basic, "x"), Err(InputError::Empty));
    }
}
