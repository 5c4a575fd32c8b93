use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use tagmatter::Config;

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let cwd = std::env::current_dir()?;
    let config = Config::discover(cli.config.as_deref(), &cwd)?;
    log::debug!("Effective configuration:\n{}", config.to_toml()?);

    let code = match cli.command {
        Commands::Tag(args) => commands::tag_command(args, &config)?,
        Commands::Apply(args) => commands::apply_command(args, &config)?,
        Commands::Pending(args) => {
            commands::pending_command(args, &config)?;
            ExitCode::SUCCESS
        }
        Commands::Vocab(args) => {
            commands::vocab_command(args, &config)?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}
