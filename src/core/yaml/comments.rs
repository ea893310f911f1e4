//! Comment placement for parsed locale files.
//!
//! Parser events carry no comments, so they are recovered from the raw
//! lines once the tree is built. Every key records an [`Anchor`]; the
//! comment lines between two content lines are then split into:
//!
//! - the head comment of the next key (contiguous lines directly above it);
//! - a detached block, which becomes the document header before the first
//!   key, a leading block of the next key when it sits at that key's
//!   indentation, or the foot of the deepest mapping it is indented into.
//!
//! A `# ...` after a key's value on the same line is that key's line comment.

use std::collections::HashMap;

use super::document::{Document, Mapping, MappingEntry, Node};

/// Where a key token sits in the source, and which entry it became.
#[derive(Debug)]
pub(super) struct Anchor {
    /// 0-based line index.
    pub line: usize,
    pub column: usize,
    /// Entry indices from the root mapping down to this key.
    pub path: Vec<usize>,
    /// The value is a literal or folded block scalar.
    pub block: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    Comment { indent: usize },
    Content,
}

fn indent_of(line: &str) -> usize {
    line.chars().count() - line.trim_start().chars().count()
}

fn classify(lines: &[&str], anchors: &[Anchor]) -> Vec<LineKind> {
    let mut kinds: Vec<LineKind> = lines
        .iter()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                LineKind::Blank
            } else if trimmed.starts_with('#') {
                LineKind::Comment {
                    indent: indent_of(line),
                }
            } else {
                LineKind::Content
            }
        })
        .collect();

    // Block scalar bodies run until the first non-blank line at or left of
    // the key; `#` lines inside them are text.
    for anchor in anchors.iter().filter(|a| a.block) {
        for (idx, line) in lines.iter().enumerate().skip(anchor.line + 1) {
            if line.trim().is_empty() {
                continue;
            }
            if indent_of(line) <= anchor.column {
                break;
            }
            kinds[idx] = LineKind::Content;
        }
    }
    kinds
}

/// Attach every recoverable comment in `content` to `document`.
pub(super) fn attach(document: &mut Document, content: &str, anchors: &[Anchor]) {
    let lines: Vec<&str> = content.lines().collect();
    let kinds = classify(&lines, anchors);

    let mut by_line: HashMap<usize, &Anchor> = HashMap::new();
    for anchor in anchors {
        by_line.entry(anchor.line).or_insert(anchor);
    }
    let columns: HashMap<&[usize], usize> = anchors
        .iter()
        .map(|a| (a.path.as_slice(), a.column))
        .collect();

    // Only the first key of a line owns its trailing comment; later keys
    // on the same line belong to a flow mapping.
    for anchor in by_line.values() {
        if let Some(comment) = line_comment(lines[anchor.line], anchor.column) {
            if let Some(entry) = entry_at(&mut document.root, &anchor.path) {
                entry.line_comment = Some(comment);
            }
        }
    }

    let mut idx = 0;
    while idx < kinds.len() {
        if kinds[idx] == LineKind::Content {
            idx += 1;
            continue;
        }
        let start = idx;
        while idx < kinds.len() && kinds[idx] != LineKind::Content {
            idx += 1;
        }
        let gap = Gap {
            lines: &lines,
            kinds: &kinds,
            start,
            end: idx,
        };
        let next = by_line.get(&idx).copied();
        let prev = anchors.iter().rev().find(|a| a.line < start);
        place_gap(document, &gap, prev, next, idx < lines.len(), &columns);
    }
}

/// A run of blank and comment lines between two content lines.
struct Gap<'a> {
    lines: &'a [&'a str],
    kinds: &'a [LineKind],
    start: usize,
    end: usize,
}

impl Gap<'_> {
    /// Start of the comment lines directly above `end` that are indented no
    /// deeper than `column`.
    fn head_start(&self, column: usize) -> usize {
        let mut head = self.end;
        while head > self.start {
            match self.kinds[head - 1] {
                LineKind::Comment { indent } if indent <= column => head -= 1,
                _ => break,
            }
        }
        head
    }

    /// Comment blocks of lines `from..to`, split wherever the indentation
    /// changes, each with its indentation. Surrounding blanks are dropped
    /// and inner blank runs become one empty line.
    fn blocks(&self, from: usize, to: usize) -> Vec<(String, usize)> {
        let mut blocks: Vec<(Vec<&str>, usize)> = Vec::new();
        for idx in from..to {
            match (self.kinds[idx], blocks.last_mut()) {
                (LineKind::Comment { indent }, Some((lines, current))) if *current == indent => {
                    lines.push(self.lines[idx].trim());
                }
                (LineKind::Comment { indent }, _) => {
                    blocks.push((vec![self.lines[idx].trim()], indent));
                }
                (_, Some((lines, _))) if lines.last() != Some(&"") => lines.push(""),
                _ => {}
            }
        }
        blocks
            .into_iter()
            .map(|(mut lines, indent)| {
                while lines.last() == Some(&"") {
                    lines.pop();
                }
                (lines.join("\n"), indent)
            })
            .collect()
    }
}

fn place_gap(
    document: &mut Document,
    gap: &Gap<'_>,
    prev: Option<&Anchor>,
    next: Option<&Anchor>,
    more_content: bool,
    columns: &HashMap<&[usize], usize>,
) {
    let mut detached_end = gap.end;
    if let Some(next) = next {
        detached_end = gap.head_start(next.column);
        let head: Vec<&str> = gap.lines[detached_end..gap.end]
            .iter()
            .map(|line| line.trim())
            .collect();
        if !head.is_empty() {
            if let Some(entry) = entry_at(&mut document.root, &next.path) {
                entry.comment = Some(head.join("\n"));
            }
        }
    }

    for (block, indent) in gap.blocks(gap.start, detached_end) {
        place_block(document, block, indent, prev, next, more_content, columns);
    }
}

fn place_block(
    document: &mut Document,
    block: String,
    indent: usize,
    prev: Option<&Anchor>,
    next: Option<&Anchor>,
    more_content: bool,
    columns: &HashMap<&[usize], usize>,
) {
    let Some(prev) = prev else {
        append(&mut document.header, block);
        return;
    };

    if let Some(next) = next.filter(|n| indent <= n.column) {
        if let Some(entry) = entry_at(&mut document.root, &next.path) {
            append(&mut entry.leading, block);
        }
        return;
    }
    // Comments in front of sequence items or other non-key content have
    // no entry to follow.
    if more_content && next.is_none() {
        return;
    }

    let depth = (1..=prev.path.len())
        .rev()
        .find(|&len| columns.get(&prev.path[..len]).is_some_and(|&c| c <= indent))
        .unwrap_or(1);
    if let Some(mapping) = mapping_at(&mut document.root, &prev.path[..depth - 1]) {
        append(&mut mapping.foot, block);
    }
}

/// Append `block` to an optional comment, one line apart.
pub(super) fn append(slot: &mut Option<String>, block: String) {
    *slot = Some(match slot.take() {
        Some(existing) => format!("{}\n{}", existing, block),
        None => block,
    });
}

fn mapping_at<'a>(root: &'a mut Mapping, path: &[usize]) -> Option<&'a mut Mapping> {
    let mut mapping = root;
    for &index in path {
        let entry = mapping.entries.get_mut(index)?;
        mapping = match &mut entry.value {
            Node::Mapping(child) => child,
            _ => return None,
        };
    }
    Some(mapping)
}

fn entry_at<'a>(root: &'a mut Mapping, path: &[usize]) -> Option<&'a mut MappingEntry> {
    let (last, parents) = path.split_last()?;
    mapping_at(root, parents)?.entries.get_mut(*last)
}

/// The `# ...` trailing the entry whose key starts at `column`.
fn line_comment(line: &str, column: usize) -> Option<String> {
    let rest: String = line.chars().skip(column).collect();
    let start = comment_start(&rest)?;
    Some(rest[start..].trim_end().to_string())
}

/// Byte offset of the first `#` that opens a comment: outside quoted
/// scalars and preceded by whitespace.
fn comment_start(text: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut prev = ' ';
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        match quote {
            Some('\'') => {
                if ch == '\'' {
                    if chars.peek().is_some_and(|&(_, c)| c == '\'') {
                        chars.next();
                    } else {
                        quote = None;
                    }
                }
            }
            Some(_) => match ch {
                '\\' => {
                    chars.next();
                }
                '"' => quote = None,
                _ => {}
            },
            None => match ch {
                '#' if prev.is_whitespace() => return Some(idx),
                '\'' | '"' if prev.is_whitespace() || matches!(prev, '[' | '{' | ',') => {
                    quote = Some(ch)
                }
                _ => {}
            },
        }
        prev = ch;
    }
    None
}
