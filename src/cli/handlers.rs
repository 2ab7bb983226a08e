use crate::cli::commands::{Cli, Commands};
use crate::cli::output::{format_tip_report, tip_report};
use crate::io::config_io::{self, ConfigError};
use crate::io::logging::init_tracing;
use crate::io::tip_store;
use crate::model::RunOptions;
use crate::ops::board::Board;
use crate::rules::{RuleEngine, TipPresenter};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = resolve_options(&cli)?;

    match cli.command {
        None => {
            init_tracing(&options.data_dir, true)?;
            crate::tui::run(options)
        }
        Some(cmd) => {
            init_tracing(&options.data_dir, false)?;
            match cmd {
                Commands::Tips => cmd_tips(&options, cli.json),
                Commands::ResetTips => cmd_reset_tips(&options),
            }
        }
    }
}

/// Merge CLI flags over the config file
pub fn resolve_options(cli: &Cli) -> Result<RunOptions, ConfigError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config_io::default_config_path);
    let mut config = config_io::read_config(&config_path)?;
    if let Some(secs) = cli.session_length {
        config.session.length_secs = secs;
    }
    for tip in &cli.disable {
        if !config.tips.disabled.contains(tip) {
            config.tips.disabled.push(*tip);
        }
    }
    Ok(RunOptions {
        data_dir: cli
            .data_dir
            .clone()
            .unwrap_or_else(config_io::default_data_dir),
        config,
        ephemeral: cli.ephemeral,
        demo: cli.demo,
    })
}

/// Presenter over the configured store, not yet configured
pub fn open_presenter(options: &RunOptions) -> TipPresenter {
    TipPresenter::new(
        RuleEngine::for_demo(options.demo),
        tip_store::open(&options.data_dir, options.ephemeral),
    )
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_tips(options: &RunOptions, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let presenter = open_presenter(options);
    let board = Board::new(options.config.session.length_secs);
    let report = tip_report(&presenter, board.rule_input());
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_tip_report(&report));
    }
    Ok(())
}

fn cmd_reset_tips(options: &RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut presenter = open_presenter(options);
    match presenter.reset_datastore() {
        Ok(()) => println!("tip datastore reset"),
        // Best effort: report and carry on
        Err(e) => {
            tracing::warn!(error = %e, "tip datastore reset failed");
            eprintln!("warning: {}", e);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TipId;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn cli_overrides_config() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "[session]\nlength_secs = 600\n").unwrap();
        let cli = Cli::try_parse_from([
            "tb",
            "--config",
            config_path.to_str().unwrap(),
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "--session-length",
            "30",
        ])
        .unwrap();
        let options = resolve_options(&cli).unwrap();
        assert_eq!(options.config.session.length_secs, 30);
        assert_eq!(options.data_dir, tmp.path());
        assert!(!options.ephemeral);
    }

    #[test]
    fn disable_flag_extends_config() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "[tips]\ndisabled = [\"streak\"]\n").unwrap();
        let cli = Cli::try_parse_from([
            "tb",
            "--config",
            config_path.to_str().unwrap(),
            "--disable",
            "streak",
            "--disable",
            "add-task",
        ])
        .unwrap();
        let options = resolve_options(&cli).unwrap();
        assert_eq!(
            options.config.tips.disabled,
            vec![TipId::Streak, TipId::AddTask]
        );
    }

    #[test]
    fn bad_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "[tips]\ndisplay_frequency = \"sometimes\"\n").unwrap();
        let cli = Cli::try_parse_from(["tb", "--config", config_path.to_str().unwrap()]).unwrap();
        assert!(resolve_options(&cli).is_err());
    }
}
