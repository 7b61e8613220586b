use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::GameConfig;
use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg};
use crate::util;

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run a headless game with random inputs and print the final state as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Field dimension options shared by all modes.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Path to a JSON game config file
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of columns (overrides the config file)
    #[clap(long)]
    width: Option<usize>,
    /// Number of rows (overrides the config file)
    #[clap(long)]
    height: Option<usize>,
}

impl ConfigArg {
    /// Reads the config file if given, applies overrides and validates the result.
    pub(crate) fn load(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        config.validate().context("Invalid game config")?;
        Ok(config)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}
