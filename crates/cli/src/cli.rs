use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::Level;

/// Simulates rangeland biomass and soil depth with learned dynamics.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: SubCmd,

    /// Log more detail (repeat for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub(crate) quiet: bool,
}

impl Cli {
    /// Returns the log level selected by `--verbose` and `--quiet`.
    pub(crate) fn log_level(&self) -> Level {
        if self.quiet {
            return Level::Warn;
        }
        match self.verbose {
            0 => Level::Info,
            1 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub(crate) enum SubCmd {
    /// Simulate scenarios with both predictors and report agreement
    Simulate(SimulateArgs),
    /// Pool raw time series into processed trajectory files
    Preprocess(PreprocessArgs),
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// TOML settings file; defaults apply when omitted
    #[arg(short, long, env = "RANGELAND_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// Run scenarios in parallel
    #[arg(long)]
    pub(crate) parallel: bool,

    /// Stop at the first failed scenario
    #[arg(long)]
    pub(crate) fail_fast: bool,

    /// Scenario ids, such as `scenario_0`
    #[arg(required = true)]
    pub(crate) scenarios: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct PreprocessArgs {
    /// TOML settings file; defaults apply when omitted
    #[arg(short, long, env = "RANGELAND_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// Scenario ids, such as `scenario_0`
    #[arg(required = true)]
    pub(crate) scenarios: Vec<String>,
}
