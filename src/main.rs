//! threadline CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use threadline::cli::{Cli, Commands, ConfigCommands};
use threadline::Config;

/// Log to stderr so stdout stays clean for JSON and history output.
///
/// `THREADLINE_LOG` takes `RUST_LOG`-style directives and wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("THREADLINE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("threadline={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Normalize(args) => {
            commands::normalize::handle(&args, &Config::resolve(config_path)?)
        }
        Commands::History(args) => commands::history::handle(&args, &Config::resolve(config_path)?),
        Commands::Stats(args) => commands::stats::handle(&args, &Config::resolve(config_path)?),
        Commands::Config(ConfigCommands::Show) => {
            commands::config::handle_show(&Config::resolve(config_path)?, config_path)
        }
        Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
    }
}
