//! History command handler

use anyhow::Result;

use threadline::cli::HistoryArgs;
use threadline::history::{chunk, render};
use threadline::{normalize_all, Config};

/// Print the plain-text history of the selected conversations.
///
/// With several conversations each one gets a `## {title}` heading.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &HistoryArgs, config: &Config) -> Result<()> {
    let selection = super::select(&args.input, config)?;
    let normalized = normalize_all(&selection.conversations, &selection.options)?;

    let mut options = config.history_options();
    if let Some(max_chars) = args.max_chars {
        options.max_chars = max_chars;
    }
    if args.timestamps {
        options.timestamps = true;
    }

    let with_headings = normalized.len() > 1;
    let mut sections = Vec::with_capacity(normalized.len());

    for conversation in &normalized {
        let body = if args.chunk {
            chunk(
                &conversation.messages,
                config.history.chunk_chars,
                options.timestamps,
            )
            .iter()
            .enumerate()
            .map(|(i, text)| format!("--- chunk {} ---\n{}", i + 1, text))
            .collect::<Vec<_>>()
            .join("\n\n")
        } else {
            render(&conversation.messages, &options)
        };

        if with_headings {
            let title = if conversation.title.is_empty() {
                conversation.id.as_deref().unwrap_or("Untitled")
            } else {
                conversation.title.as_str()
            };
            sections.push(format!("## {}\n\n{}", title, body));
        } else {
            sections.push(body);
        }
    }

    println!("{}", sections.join("\n\n"));
    Ok(())
}
