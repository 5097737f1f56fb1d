//! Shell completions handler

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use threadline::cli::Cli;

/// Write completions for `shell` to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
}
