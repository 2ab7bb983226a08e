use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::session::DEFAULT_SESSION_LENGTH;
use super::tip::{DisplayFrequency, TipId};

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub tips: TipsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Focus sprint length in seconds
    #[serde(default = "default_session_length")]
    pub length_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            length_secs: DEFAULT_SESSION_LENGTH,
        }
    }
}

fn default_session_length() -> u32 {
    DEFAULT_SESSION_LENGTH
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TipsConfig {
    #[serde(default)]
    pub display_frequency: DisplayFrequency,
    /// Suppress a tip after it has appeared this many times
    #[serde(default)]
    pub max_display_count: Option<u32>,
    /// Tips that never appear
    #[serde(default)]
    pub disabled: Vec<TipId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex overrides for theme colors, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Which demo the board runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DemoMode {
    /// Task board with the full set of progressive tips
    #[default]
    Board,
    /// One button and a single "complete your first task" tip
    Single,
}

/// Everything the front end needs to start, resolved from CLI and config
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub data_dir: PathBuf,
    pub config: BoardConfig,
    /// Keep tip records in memory only
    pub ephemeral: bool,
    pub demo: DemoMode,
}
