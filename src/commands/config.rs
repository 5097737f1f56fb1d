//! Config subcommands handler

use std::path::Path;

use anyhow::Result;

use threadline::Config;

/// Show the effective configuration as TOML, prefixed with the file it
/// was read from.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config, explicit_path: Option<&Path>) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    let path = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => Config::config_path().ok(),
    };
    if let Some(path) = path {
        let state = if path.exists() { "" } else { " (not present, defaults)" };
        println!("# {}{}", path.display(), state);
    }
    println!("{}", toml_str);
    Ok(())
}
