//! Development tasks for threadline.
//!
//! Run with `cargo run -p xtask -- <task>`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_mangen::Man;

use threadline::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for threadline")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for threadline and its subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => generate_man_pages(&out_dir),
    }
}

fn generate_man_pages(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let command = Cli::command();
    write_man_page(&command, "threadline", out_dir)?;

    for sub in command.get_subcommands() {
        let name = format!("threadline-{}", sub.get_name());
        write_man_page(sub, &name, out_dir)?;
    }

    println!("Man pages written to {}", out_dir.display());
    Ok(())
}

fn write_man_page(command: &clap::Command, name: &str, out_dir: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    Man::new(command.clone()).render(&mut buffer)?;
    let path = out_dir.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
