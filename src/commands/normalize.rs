//! Normalize command handler

use anyhow::Result;

use threadline::cli::NormalizeArgs;
use threadline::{normalize_all, Config};

/// Print normalized conversations as JSON.
///
/// A single object when `--conversation` is given, an array otherwise.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &NormalizeArgs, config: &Config) -> Result<()> {
    let selection = super::select(&args.input, config)?;
    let normalized = normalize_all(&selection.conversations, &selection.options)?;

    let json = match (args.input.conversation.is_some(), normalized.first()) {
        (true, Some(single)) => to_json(single, args.pretty)?,
        _ => to_json(&normalized, args.pretty)?,
    };
    println!("{}", json);
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
