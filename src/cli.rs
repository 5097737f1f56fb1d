//! Command-line interface definitions.
//!
//! Kept in the library so the `xtask` crate can generate man pages from
//! the same definitions the binary parses.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Version string with git commit and build date.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("THREADLINE_BUILD_DATE"),
    ")"
);

/// Version string with build date.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("THREADLINE_BUILD_DATE"),
    ")"
);

/// Extract the active message path from branching chat conversation exports.
#[derive(Debug, Parser)]
#[command(name = "threadline", version = VERSION, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr (overridden by THREADLINE_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize conversations to their visible active path as JSON
    Normalize(NormalizeArgs),

    /// Render conversations as a plain-text history
    History(HistoryArgs),

    /// Summarize an export: conversations, messages, roles, warnings
    Stats(StatsArgs),

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments shared by commands that read an export.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Export file: one conversation object or an array of conversations
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only process the conversation with this id
    #[arg(short = 'c', long, value_name = "ID")]
    pub conversation: Option<String>,

    /// Fail on dangling or cyclic node links instead of truncating
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Maximum characters per conversation (default from config)
    #[arg(long, value_name = "N")]
    pub max_chars: Option<usize>,

    /// Prefix messages with their UTC timestamp
    #[arg(long)]
    pub timestamps: bool,

    /// Split output into chunks (size from config `history.chunk_chars`)
    #[arg(long)]
    pub chunk: bool,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
}
