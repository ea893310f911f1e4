//! Nested YAML output for flat catalogs.

use super::document::{INDENT, write_comment, write_scalar};
use super::scalar::key_token;
use crate::core::catalog::CatalogEntry;

/// Serialize flat entries into a nested YAML document.
///
/// Entries are sorted by their full dotted key (byte order). Only the
/// segments that differ from the previous entry's parent path are opened,
/// each nesting level adds two spaces of indentation, and a blank line
/// separates top-level groups. Comments are written directly above their
/// leaf at the leaf's indentation.
///
/// # Examples
///
/// ```
/// use i18n_report::core::CatalogEntry;
/// use i18n_report::core::yaml::unflatten;
///
/// let entries = vec![
///     CatalogEntry::new("tray.preferences", "Preferences"),
///     CatalogEntry::new("action.refresh", "Refresh"),
/// ];
/// assert_eq!(
///     unflatten(&entries),
///     "action:\n  refresh: Refresh\n\ntray:\n  preferences: Preferences\n"
/// );
/// ```
pub fn unflatten<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let mut sorted: Vec<&CatalogEntry> = entries.into_iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));

    let mut out = String::new();
    let mut prev: Vec<&str> = Vec::new();

    for entry in sorted {
        let parts: Vec<&str> = entry.key.split('.').collect();
        let depth = parts.len() - 1;

        if !prev.is_empty() && prev[0] != parts[0] {
            out.push('\n');
        }

        let prev_parents = prev.len().saturating_sub(1);
        let common = parts[..depth]
            .iter()
            .zip(&prev[..prev_parents])
            .take_while(|(a, b)| a == b)
            .count();

        for (level, segment) in parts.iter().enumerate().take(depth).skip(common) {
            out.push_str(&INDENT.repeat(level));
            out.push_str(&key_token(segment));
            out.push_str(":\n");
        }

        let indent = INDENT.repeat(depth);
        write_comment(&mut out, entry.comment.as_deref(), &indent);
        out.push_str(&indent);
        out.push_str(&key_token(parts[depth]));
        out.push_str(": ");
        write_scalar(&mut out, &entry.value, &indent);

        prev = parts;
    }

    out
}
