//! Plain-text history rendering and chunking.
//!
//! Downstream consumers (memory extraction, embedding) take a conversation
//! as one text blob rather than structured records. These helpers produce
//! that blob with a hard character cap, or split it into bounded chunks on
//! message boundaries.

use chrono::DateTime;

use crate::conversation::MessageRecord;

/// Default cap on a rendered history, in characters.
pub const DEFAULT_MAX_CHARS: usize = 100_000;

/// Default chunk size, in characters.
pub const DEFAULT_CHUNK_CHARS: usize = 8_000;

/// Separator between rendered messages.
const MESSAGE_SEPARATOR: &str = "\n\n";

/// Options for [`render`] and [`chunk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOptions {
    /// Maximum characters in the rendered output
    pub max_chars: usize,
    /// Prefix each message with its UTC creation time
    pub timestamps: bool,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            timestamps: false,
        }
    }
}

/// Render one record as `"{Role}: {content}"`.
///
/// Returns `None` for records whose content is empty or whitespace.
pub fn render_record(record: &MessageRecord, timestamps: bool) -> Option<String> {
    if record.content.trim().is_empty() {
        return None;
    }

    let label = role_label(&record.role);
    let stamp = if timestamps {
        record.timestamp().and_then(format_timestamp)
    } else {
        None
    };

    Some(match stamp {
        Some(stamp) => format!("[{}] {}: {}", stamp, label, record.content),
        None => format!("{}: {}", label, record.content),
    })
}

/// Render records into one history blob, cut to `options.max_chars`.
pub fn render(records: &[MessageRecord], options: &HistoryOptions) -> String {
    let blocks: Vec<String> = records
        .iter()
        .filter_map(|record| render_record(record, options.timestamps))
        .collect();
    let rendered = blocks.join(MESSAGE_SEPARATOR);

    let cut = truncate_chars(&rendered, options.max_chars);
    if cut.len() < rendered.len() {
        tracing::debug!(
            total = rendered.chars().count(),
            kept = options.max_chars,
            "history truncated"
        );
    }
    cut.to_string()
}

/// Pack rendered records into chunks of at most `max_chars` characters.
///
/// Messages are kept whole where they fit; a single message longer than
/// the limit is split across several chunks.
pub fn chunk(records: &[MessageRecord], max_chars: usize, timestamps: bool) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let separator_len = MESSAGE_SEPARATOR.chars().count();

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for block in records
        .iter()
        .filter_map(|record| render_record(record, timestamps))
    {
        let block_len = block.chars().count();

        if block_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            chunks.extend(split_chars(&block, max_chars));
            continue;
        }

        if current.is_empty() {
            current = block;
            current_len = block_len;
        } else if current_len + separator_len + block_len <= max_chars {
            current.push_str(MESSAGE_SEPARATOR);
            current.push_str(&block);
            current_len += separator_len + block_len;
        } else {
            chunks.push(std::mem::replace(&mut current, block));
            current_len = block_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Capitalized role for display: `user` -> `User`.
fn role_label(role: &str) -> String {
    let mut chars = role.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Unknown".to_string(),
    }
}

fn format_timestamp(create_time: f64) -> Option<String> {
    if !create_time.is_finite() {
        return None;
    }
    DateTime::from_timestamp(create_time.trunc() as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Longest prefix of `s` with at most `max` characters.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn split_chars(s: &str, max: usize) -> Vec<String> {
    s.chars()
        .collect::<Vec<_>>()
        .chunks(max)
        .map(|piece| piece.iter().collect())
        .collect()
}
