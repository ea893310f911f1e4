//! Comment-preserving YAML document tree.
//!
//! Locale files are parsed into ordered mapping nodes where every key
//! carries the comment block written directly above it, its trailing line
//! comment, and any blank-separated block in front of it. Mappings keep the
//! comments that close them, and the document keeps its header. The tree is
//! the single load path for catalogs: reports flatten it and ignore
//! comments, while merge and translate keep the head comments. Key removal
//! edits the tree in place and writes it back in document order.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use super::comments::{self, Anchor, append};
use super::scalar::{ScalarRepr, key_token, render};
use crate::core::catalog::CatalogEntry;

/// Indentation added per nesting level.
pub const INDENT: &str = "  ";

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

/// An ordered mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    pub entries: Vec<MappingEntry>,
    /// Comment lines after the last entry, at the entries' indentation.
    pub foot: Option<String>,
}

/// A key of a mapping, its value, and the comments around it.
///
/// Comment fields hold lines starting with `#` joined with `\n`; an empty
/// line stands for a blank line inside the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub key: String,
    /// Comment lines directly above the key.
    pub comment: Option<String>,
    /// Comment after the value on the key's line.
    pub line_comment: Option<String>,
    /// Comment block above the key, separated from it by a blank line.
    pub leading: Option<String>,
    pub value: Node,
}

impl MappingEntry {
    pub fn new(key: impl Into<String>, value: Node) -> Self {
        Self {
            key: key.into(),
            comment: None,
            line_comment: None,
            leading: None,
            value,
        }
    }
}

/// A parsed locale file. The top-level node is always a mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Comment block at the top of the file, separated from the first key
    /// by a blank line.
    pub header: Option<String>,
    pub root: Mapping,
}

impl Document {
    /// Parse YAML text. An empty document yields an empty mapping.
    pub fn parse(content: &str) -> Result<Self> {
        let mut parser = Parser::new_from_str(content);
        let mut builder = DocumentBuilder::new(content);
        parser.load(&mut builder, false)?;

        let (root, anchors) = builder.finish()?;
        let mut document = match root {
            None => Self::default(),
            Some(Node::Mapping(root)) => Self { header: None, root },
            Some(_) => bail!("top-level YAML node is not a mapping"),
        };
        comments::attach(&mut document, content, &anchors);
        Ok(document)
    }

    /// Flatten to dotted keys, keeping the comment above each leaf.
    ///
    /// Empty mappings contribute no entries; sequences are leaves rendered
    /// in flow form.
    pub fn flatten_with_comments(&self) -> Vec<CatalogEntry> {
        let mut result = Vec::new();
        flatten_mapping(&self.root, "", &mut result);
        result
    }

    /// Flatten to a dotted key → value map, dropping comments.
    pub fn flatten(&self) -> BTreeMap<String, String> {
        self.flatten_with_comments()
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect()
    }

    /// Remove a dotted key, pruning every mapping the removal leaves empty.
    ///
    /// Returns true if the leaf was found and removed. The root mapping is
    /// never pruned.
    pub fn remove_key(&mut self, key: &str) -> bool {
        let parts: Vec<&str> = key.split('.').collect();
        remove_path(&mut self.root, &parts)
    }

    /// Serialize in document order with 2-space indentation and a blank
    /// line between top-level entries.
    pub fn to_yaml(&self) -> String {
        let mut out = String::new();
        if let Some(header) = &self.header {
            write_block(&mut out, header, "");
            if !self.root.entries.is_empty() || self.root.foot.is_some() {
                out.push('\n');
            }
        }
        write_mapping(&mut out, &self.root, 0);
        out
    }
}

fn flatten_mapping(mapping: &Mapping, prefix: &str, result: &mut Vec<CatalogEntry>) {
    for entry in &mapping.entries {
        let key = if prefix.is_empty() {
            entry.key.clone()
        } else {
            format!("{}.{}", prefix, entry.key)
        };
        match &entry.value {
            Node::Mapping(child) => flatten_mapping(child, &key, result),
            leaf => result.push(CatalogEntry {
                key,
                value: leaf.to_flow_string(),
                comment: entry.comment.clone(),
            }),
        }
    }
}

fn remove_path(mapping: &mut Mapping, parts: &[&str]) -> bool {
    let Some((first, rest)) = parts.split_first() else {
        return false;
    };
    let Some(index) = mapping.entries.iter().position(|e| e.key == *first) else {
        return false;
    };

    if rest.is_empty() {
        remove_entry(mapping, index);
        return true;
    }

    let Node::Mapping(child) = &mut mapping.entries[index].value else {
        return false;
    };
    if !remove_path(child, rest) {
        return false;
    }
    if child.entries.is_empty() {
        remove_entry(mapping, index);
    }
    true
}

/// Remove one entry with its own comments. A blank-separated block in
/// front of it stays in place: it moves to the next entry, or to the
/// mapping's foot when the entry was the last one.
fn remove_entry(mapping: &mut Mapping, index: usize) {
    let removed = mapping.entries.remove(index);
    let Some(leading) = removed.leading else {
        return;
    };
    match mapping.entries.get_mut(index) {
        Some(next) => {
            let mut block = Some(leading);
            if let Some(own) = next.leading.take() {
                append(&mut block, own);
            }
            next.leading = block;
        }
        None => {
            let mut block = Some(leading);
            if let Some(foot) = mapping.foot.take() {
                append(&mut block, foot);
            }
            mapping.foot = block;
        }
    }
}

impl Node {
    /// String form of a leaf; sequences and mappings use YAML flow syntax.
    pub fn to_flow_string(&self) -> String {
        match self {
            Node::Scalar(s) => s.clone(),
            other => other.to_flow(),
        }
    }

    fn to_flow(&self) -> String {
        match self {
            Node::Scalar(s) => flow_scalar(s),
            Node::Sequence(items) => {
                let items: Vec<String> = items.iter().map(Node::to_flow).collect();
                format!("[{}]", items.join(", "))
            }
            Node::Mapping(mapping) => {
                let entries: Vec<String> = mapping
                    .entries
                    .iter()
                    .map(|e| format!("{}: {}", flow_scalar(&e.key), e.value.to_flow()))
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
        }
    }
}

fn flow_scalar(value: &str) -> String {
    if value.contains([',', '[', ']', '{', '}']) {
        format!("'{}'", value.replace('\'', "''"))
    } else {
        match render(value) {
            ScalarRepr::Inline(text) => text,
            ScalarRepr::Block { .. } => format!("\"{}\"", value.escape_default()),
        }
    }
}

fn write_mapping(out: &mut String, mapping: &Mapping, depth: usize) {
    let indent = INDENT.repeat(depth);
    for (i, entry) in mapping.entries.iter().enumerate() {
        if depth == 0 && i > 0 {
            out.push('\n');
        }
        if let Some(leading) = &entry.leading {
            write_block(out, leading, &indent);
            out.push('\n');
        }
        write_comment(out, entry.comment.as_deref(), &indent);

        out.push_str(&indent);
        out.push_str(&key_token(&entry.key));
        out.push(':');
        let line_comment = entry.line_comment.as_deref();
        match &entry.value {
            Node::Mapping(child) if !child.entries.is_empty() => {
                end_line(out, line_comment);
                write_mapping(out, child, depth + 1);
            }
            Node::Mapping(_) => {
                out.push_str(" {}");
                end_line(out, line_comment);
            }
            Node::Sequence(items) if !items.is_empty() => {
                end_line(out, line_comment);
                for item in items {
                    out.push_str(&indent);
                    out.push_str(INDENT);
                    out.push_str("- ");
                    out.push_str(&item.to_flow());
                    out.push('\n');
                }
            }
            Node::Sequence(_) => {
                out.push_str(" []");
                end_line(out, line_comment);
            }
            Node::Scalar(value) => {
                out.push(' ');
                write_scalar_with_comment(out, value, &indent, line_comment);
            }
        }
    }

    if let Some(foot) = &mapping.foot {
        if depth == 0 && !mapping.entries.is_empty() {
            out.push('\n');
        }
        write_block(out, foot, &indent);
    }
}

fn end_line(out: &mut String, line_comment: Option<&str>) {
    if let Some(comment) = line_comment {
        out.push(' ');
        out.push_str(comment);
    }
    out.push('\n');
}

/// Write a comment block at `indent`, keeping its blank lines empty.
fn write_block(out: &mut String, block: &str, indent: &str) {
    for line in block.split('\n') {
        if !line.is_empty() {
            out.push_str(indent);
            out.push_str(line);
        }
        out.push('\n');
    }
}

/// Write comment lines at `indent`, one per line.
pub(crate) fn write_comment(out: &mut String, comment: Option<&str>, indent: &str) {
    let Some(comment) = comment.filter(|c| !c.is_empty()) else {
        return;
    };
    for line in comment.split('\n') {
        out.push_str(indent);
        out.push_str(line);
        out.push('\n');
    }
}

/// Write a scalar value after `key: `, re-indenting block bodies one level
/// below `indent`.
pub(crate) fn write_scalar(out: &mut String, value: &str, indent: &str) {
    write_scalar_with_comment(out, value, indent, None);
}

fn write_scalar_with_comment(
    out: &mut String,
    value: &str,
    indent: &str,
    line_comment: Option<&str>,
) {
    match render(value) {
        ScalarRepr::Inline(text) => {
            out.push_str(&text);
            end_line(out, line_comment);
        }
        ScalarRepr::Block { header, lines } => {
            out.push_str(&header);
            end_line(out, line_comment);
            for line in lines {
                if !line.is_empty() {
                    out.push_str(indent);
                    out.push_str(INDENT);
                    out.push_str(&line);
                }
                out.push('\n');
            }
        }
    }
}

// ============================================================
// Parsing
// ============================================================

enum BuildNode {
    Sequence(Vec<Node>),
    Mapping {
        entries: Vec<MappingEntry>,
        /// Key waiting for a value.
        pending_key: Option<String>,
        /// Entry indices leading here from the root; `None` inside sequences.
        path: Option<Vec<usize>>,
    },
}

struct DocumentBuilder<'a> {
    lines: Vec<&'a str>,
    stack: Vec<BuildNode>,
    root: Option<Node>,
    anchors: Vec<Anchor>,
    error: Option<String>,
}

impl<'a> DocumentBuilder<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().collect(),
            stack: Vec::new(),
            root: None,
            anchors: Vec::new(),
            error: None,
        }
    }

    fn finish(self) -> Result<(Option<Node>, Vec<Anchor>)> {
        match self.error {
            Some(error) => bail!(error),
            None => Ok((self.root, self.anchors)),
        }
    }

    fn expects_key(&self) -> bool {
        matches!(
            self.stack.last(),
            Some(BuildNode::Mapping {
                pending_key: None,
                ..
            })
        )
    }

    /// Path of the entry the next value completes, if it is reachable from
    /// the root through mappings only.
    fn pending_path(&self) -> Option<Vec<usize>> {
        match self.stack.last() {
            Some(BuildNode::Mapping {
                entries,
                pending_key: Some(_),
                path: Some(path),
            }) => {
                let mut path = path.clone();
                path.push(entries.len());
                Some(path)
            }
            _ => None,
        }
    }

    fn push_complete(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => self.root = Some(node),
            Some(BuildNode::Sequence(items)) => items.push(node),
            Some(BuildNode::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                Some(key) => entries.push(MappingEntry::new(key, node)),
                None => {
                    self.error
                        .get_or_insert_with(|| "complex mapping keys are not supported".into());
                }
            },
        }
    }

    fn set_pending_key(&mut self, key: String, marker: &Marker) {
        if let Some(line) = self.key_line(marker, &key) {
            if let Some(BuildNode::Mapping {
                entries,
                path: Some(path),
                ..
            }) = self.stack.last()
            {
                let mut path = path.clone();
                path.push(entries.len());
                self.anchors.push(Anchor {
                    line,
                    column: marker.col(),
                    path,
                    block: false,
                });
            }
        }
        if let Some(BuildNode::Mapping { pending_key, .. }) = self.stack.last_mut() {
            *pending_key = Some(key);
        }
    }

    /// Flag the pending key's anchor: its value is a block scalar whose
    /// body lines may look like comments.
    fn mark_block_value(&mut self) {
        let Some(path) = self.pending_path() else {
            return;
        };
        if let Some(anchor) = self.anchors.last_mut().filter(|a| a.path == path) {
            anchor.block = true;
        }
    }

    /// 0-based index of the line holding the key token at `marker`.
    ///
    /// Marker lines are 1-based; the raw text at the marker column is
    /// checked so the lookup never lands on a neighbouring line.
    fn key_line(&self, marker: &Marker, key: &str) -> Option<usize> {
        let line = marker.line();
        let column = marker.col();
        [line.checked_sub(1), Some(line)]
            .into_iter()
            .flatten()
            .find(|&idx| {
                self.lines.get(idx).is_some_and(|l| {
                    let rest: String = l.chars().skip(column).collect();
                    rest.starts_with(key) || rest.starts_with(['\'', '"'])
                })
            })
    }
}

impl MarkedEventReceiver for DocumentBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        if self.error.is_some() {
            return;
        }
        match ev {
            Event::Scalar(value, style, _anchor_id, _tag) => {
                if self.expects_key() {
                    self.set_pending_key(value, &marker);
                } else {
                    if matches!(style, TScalarStyle::Literal | TScalarStyle::Folded) {
                        self.mark_block_value();
                    }
                    let value = if style == TScalarStyle::Plain
                        && matches!(value.as_str(), "~" | "null" | "Null" | "NULL")
                    {
                        String::new()
                    } else {
                        value
                    };
                    self.push_complete(Node::Scalar(value));
                }
            }
            Event::SequenceStart(..) => self.stack.push(BuildNode::Sequence(Vec::new())),
            Event::MappingStart(..) => {
                let path = if self.stack.is_empty() {
                    Some(Vec::new())
                } else {
                    self.pending_path()
                };
                self.stack.push(BuildNode::Mapping {
                    entries: Vec::new(),
                    pending_key: None,
                    path,
                });
            }
            Event::SequenceEnd | Event::MappingEnd => {
                let node = match self.stack.pop() {
                    Some(BuildNode::Sequence(items)) => Node::Sequence(items),
                    Some(BuildNode::Mapping { entries, .. }) => Node::Mapping(Mapping {
                        entries,
                        foot: None,
                    }),
                    None => return,
                };
                self.push_complete(node);
            }
            Event::Alias(_) => {
                self.error
                    .get_or_insert_with(|| "YAML aliases are not supported".into());
            }
            _ => {}
        }
    }
}
