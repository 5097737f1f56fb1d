//! Stats command handler

use std::collections::BTreeMap;

use anyhow::Result;
use humansize::{format_size, DECIMAL};

use threadline::cli::StatsArgs;
use threadline::conversation::Source;
use threadline::history::{render, HistoryOptions};
use threadline::{normalize_all, Config, NormalizedConversation};

/// Aggregate figures over a set of normalized conversations.
#[derive(Debug, Default, PartialEq)]
pub struct ExportStats {
    pub conversations: usize,
    pub from_mapping: usize,
    pub passthrough: usize,
    pub empty: usize,
    pub messages: usize,
    pub roles: BTreeMap<String, usize>,
    pub fallbacks: usize,
    pub structural_warnings: usize,
    pub history_bytes: usize,
}

impl ExportStats {
    pub fn collect(normalized: &[NormalizedConversation]) -> Self {
        let mut stats = Self {
            conversations: normalized.len(),
            ..Self::default()
        };
        // Full, uncapped size
        let options = HistoryOptions {
            max_chars: usize::MAX,
            timestamps: false,
        };

        for conversation in normalized {
            match conversation.source {
                Source::Mapping => stats.from_mapping += 1,
                Source::Passthrough => stats.passthrough += 1,
                Source::Empty => stats.empty += 1,
            }
            stats.messages += conversation.messages.len();
            for message in &conversation.messages {
                *stats.roles.entry(message.role.clone()).or_default() += 1;
            }
            if conversation.used_fallback() {
                stats.fallbacks += 1;
            }
            stats.structural_warnings += conversation
                .warnings
                .iter()
                .filter(|w| w.is_structural())
                .count();
            stats.history_bytes += render(&conversation.messages, &options).len();
        }

        stats
    }
}

/// Print a summary of the export.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &StatsArgs, config: &Config) -> Result<()> {
    let selection = super::select(&args.input, config)?;
    let normalized = normalize_all(&selection.conversations, &selection.options)?;
    let stats = ExportStats::collect(&normalized);

    println!("Conversations:       {}", stats.conversations);
    println!("  from mapping:      {}", stats.from_mapping);
    println!("  pre-parsed:        {}", stats.passthrough);
    println!("  empty:             {}", stats.empty);
    println!("Visible messages:    {}", stats.messages);
    for (role, count) in &stats.roles {
        println!("  {:<18} {}", format!("{}:", role), count);
    }
    println!("Fallback traversals: {}", stats.fallbacks);
    println!("Structural warnings: {}", stats.structural_warnings);
    println!(
        "History size:        {}",
        format_size(stats.history_bytes, DECIMAL)
    );
    Ok(())
}
