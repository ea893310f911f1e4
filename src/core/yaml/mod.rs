//! YAML engine for locale files: comment-preserving parsing, nested
//! output for flat catalogs, and scalar quoting.

mod comments;
mod document;
mod scalar;
mod writer;

pub use document::{Document, INDENT, Mapping, MappingEntry, Node};
pub use scalar::{ScalarRepr, key_token, quote, render, unquote};
pub use writer::unflatten;
