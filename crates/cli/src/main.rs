mod cli;
mod preprocess;
mod settings;
mod simulate;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::warn;

use crate::{
    cli::{Cli, SubCmd},
    settings::Settings,
};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    simple_logger::init_with_level(cli.log_level())?;

    let failures = match cli.cmd {
        SubCmd::Simulate(args) => {
            let settings = Settings::load(args.config.as_deref())?;
            simulate::execute(&settings, &args.scenarios, args.parallel, args.fail_fast)?
        }
        SubCmd::Preprocess(args) => {
            let settings = Settings::load(args.config.as_deref())?;
            preprocess::execute(&settings, &args.scenarios)?
        }
    };

    if failures == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("{failures} scenario(s) failed");
        Ok(ExitCode::FAILURE)
    }
}
