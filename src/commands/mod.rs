//! Subcommand handlers

pub mod completions;
pub mod config;
pub mod history;
pub mod normalize;
pub mod stats;

use anyhow::{anyhow, Result};

use threadline::cli::InputArgs;
use threadline::conversation::{Conversation, LinkPolicy, NormalizeOptions};
use threadline::export::take_conversation;
use threadline::{load_export, Config};

/// Conversations selected by the input arguments, with the options to
/// normalize them under.
pub struct Selection {
    pub conversations: Vec<Conversation>,
    pub options: NormalizeOptions,
}

/// Load the export and apply `--conversation` and `--strict`.
pub fn select(input: &InputArgs, config: &Config) -> Result<Selection> {
    let mut conversations = load_export(&input.file)?;

    if let Some(id) = &input.conversation {
        let conversation = take_conversation(conversations, id)
            .ok_or_else(|| anyhow!("Conversation not found: {}", id))?;
        conversations = vec![conversation];
    }

    let mut options = config.normalize_options();
    if input.strict {
        options.link_policy = LinkPolicy::Strict;
    }

    Ok(Selection {
        conversations,
        options,
    })
}
