//! gh-review: parse pull request patches and markdown into JSON.
//!
//! Sets up logging, reads the configuration, dispatches the subcommand and
//! prints its JSON output to stdout.

mod cli;
mod commands;
mod logger;

use anyhow::Result;
use cli::Cli;
use gh_review_config::AppConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    logger::init()?;

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    logger::apply_configured_level(&config.log_level);
    log::debug!("Running {:?}", cli.command);

    let output = commands::run(&cli.command, &config.markdown, cli.compact)?;
    println!("{}", output);
    Ok(())
}
