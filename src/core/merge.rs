//! Parsing of translated text for `merge`.
//!
//! Translations arrive as flat `key=value` or `key: value` lines, optionally
//! wrapped in agent transcripts (JSON Lines) or Markdown code fences, with
//! `# @reason` comments attached to the following key.

use serde::Deserialize;

use super::catalog::CatalogEntry;
use super::yaml::unquote;
use crate::utils::is_valid_dotted_key;

/// Comment lines starting with this tag are kept as reason comments.
pub const REASON_TAG: &str = "# @reason";

/// Prefix of continuation lines of a multi-line reason comment.
const CONTINUATION_PREFIX: &str = "#   ";

const FENCE_OPEN: &str = "```yaml";
const FENCE_CLOSE: &str = "```";

#[derive(Deserialize)]
struct TranscriptLine {
    message: TranscriptMessage,
}

#[derive(Deserialize)]
struct TranscriptMessage {
    role: String,
    #[serde(default)]
    content: serde_json::Value,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Pull the translation text out of raw input.
///
/// JSON Lines transcripts (first non-blank line starts with `{`) are reduced
/// to the text blocks of assistant messages, each followed by a newline.
/// If the result then contains a ```` ```yaml ```` fence, only the fenced
/// lines are kept (when there are any). Anything else passes through.
pub fn extract_translation_text(raw: &str) -> String {
    let mut content = raw.to_string();

    let first_line = raw.lines().map(str::trim).find(|l| !l.is_empty());
    if first_line.is_some_and(|l| l.starts_with('{')) {
        content = extract_transcript_text(raw);
    }

    if content.contains(FENCE_OPEN) {
        let fenced = extract_fenced_text(&content);
        if !fenced.is_empty() {
            content = fenced;
        }
    }

    content
}

fn extract_transcript_text(raw: &str) -> String {
    let mut extracted = String::new();
    for line in raw.lines().map(str::trim) {
        if !line.starts_with('{') {
            continue;
        }
        let Ok(entry) = serde_json::from_str::<TranscriptLine>(line) else {
            continue;
        };
        if entry.message.role != "assistant" {
            continue;
        }
        let Ok(blocks) = serde_json::from_value::<Vec<ContentBlock>>(entry.message.content) else {
            continue;
        };
        for block in blocks.into_iter().filter(|b| b.kind == "text") {
            extracted.push_str(&block.text);
            extracted.push('\n');
        }
    }
    extracted
}

fn extract_fenced_text(content: &str) -> String {
    let mut extracted = String::new();
    let mut in_fence = false;
    for line in content.split('\n') {
        let trimmed = line.trim();
        if trimmed == FENCE_OPEN {
            in_fence = true;
        } else if trimmed == FENCE_CLOSE && in_fence {
            in_fence = false;
        } else if in_fence {
            extracted.push_str(line);
            extracted.push('\n');
        }
    }
    extracted
}

/// Parser state threaded through the lines of merge input.
#[derive(Debug, Default)]
struct ParseState {
    pending_comment: Vec<String>,
    entries: Vec<CatalogEntry>,
}

impl ParseState {
    fn take_comment(&mut self) -> String {
        std::mem::take(&mut self.pending_comment).join("\n")
    }

    fn feed(mut self, line: &str) -> Self {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed == "---" {
            self.pending_comment.clear();
        } else if trimmed.starts_with(REASON_TAG) {
            self.pending_comment.push(trimmed.to_string());
        } else if trimmed.starts_with(CONTINUATION_PREFIX) && !self.pending_comment.is_empty() {
            self.pending_comment.push(trimmed.to_string());
        } else if trimmed.starts_with('#') {
            // Other comments carry no meaning.
        } else if let Some((key, value)) = parse_key_value(trimmed) {
            let comment = self.take_comment();
            self.entries
                .push(CatalogEntry::new(key, value).with_comment(comment));
        } else {
            self.pending_comment.clear();
        }

        self
    }
}

/// Parse one `key: value` or `key=value` line.
///
/// `key: value` is tried first and its value is unquoted; `key=value`
/// keeps the value verbatim. Either way the key must be a dotted key.
fn parse_key_value(line: &str) -> Option<(&str, String)> {
    if let Some((key, value)) = line.split_once(": ") {
        if is_valid_dotted_key(key) {
            return Some((key, unquote(value)));
        }
    }
    match line.split_once('=') {
        Some((key, value)) if is_valid_dotted_key(key) => Some((key, value.to_string())),
        _ => None,
    }
}

/// Parse flat translation lines into catalog entries.
///
/// Reason comments accumulate until the next key line and are attached to
/// it. Blank lines, `---` separators and unrecognized lines drop a pending
/// comment; other `#` lines are ignored.
///
/// # Examples
///
/// ```
/// use i18n_report::core::merge::parse_merge_input;
///
/// let entries = parse_merge_input("# @reason formal register\ntray.quit=Beenden\n");
/// assert_eq!(entries[0].key, "tray.quit");
/// assert_eq!(entries[0].value, "Beenden");
/// assert_eq!(entries[0].comment.as_deref(), Some("# @reason formal register"));
/// ```
pub fn parse_merge_input(text: &str) -> Vec<CatalogEntry> {
    text.lines()
        .fold(ParseState::default(), ParseState::feed)
        .entries
}
