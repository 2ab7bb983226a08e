use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::{DemoMode, TipId};

#[derive(Parser)]
#[command(name = "tb", about = concat!("tipboard v", env!("CARGO_PKG_VERSION"), " - a task board with contextual tips"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory for tip records and the log file
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/tipboard/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep tip history in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Which demo to run
    #[arg(long, value_enum, default_value_t = DemoMode::Board, global = true)]
    pub demo: DemoMode,

    /// Never show this tip (repeatable, adds to `[tips] disabled`)
    #[arg(long = "disable", value_name = "TIP", global = true)]
    pub disable: Vec<TipId>,

    /// Focus session length in seconds (overrides config)
    #[arg(long = "session-length")]
    pub session_length: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every tip's rules, eligibility on a fresh board and display history
    Tips,
    /// Clear the tip datastore so every tip can show again
    ResetTips,
}
