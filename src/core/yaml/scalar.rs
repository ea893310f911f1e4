//! YAML scalar quoting.
//!
//! Decides how a catalog value is written to a locale file: plain when the
//! plain form reads back as the same string, single-quoted when a plain
//! scalar would be misread (booleans, nulls, numbers, `: ` sequences,
//! surrounding whitespace), double-quoted when escapes are required, and a
//! literal block for multi-line text.

use std::sync::LazyLock;

use regex::Regex;

/// Integers in any YAML 1.1/1.2 notation, including sexagesimal.
static INT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[-+]?(?:0b[01_]+|0o?[0-7_]+|0x[0-9a-fA-F_]+|[0-9][0-9_]*|[1-9][0-9_]*(?::[0-5]?[0-9])+)$",
    )
    .unwrap()
});

/// Floats, including `.inf`/`.nan` and sexagesimal floats.
static FLOAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[-+]?(?:[0-9][0-9_]*)?\.[0-9_]*(?:[eE][-+]?[0-9]+)?|[-+]?[0-9][0-9_]*[eE][-+]?[0-9]+|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
    )
    .unwrap()
});

/// Dates and timestamps that YAML 1.1 loaders turn into time values.
static TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:(?:[Tt]|[ \t]+)[0-9]{1,2}:[0-9]{2}:[0-9]{2}.*)?$")
        .unwrap()
});

/// How a scalar value is laid out in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarRepr {
    /// A single-line token written right after `key: `.
    Inline(String),
    /// A literal block: the header (`|`, `|-`) goes after `key: `, and each
    /// body line goes on its own line one indentation level deeper. Empty
    /// body lines are written as empty lines.
    Block { header: String, lines: Vec<String> },
}

/// Choose the layout for `value`.
pub fn render(value: &str) -> ScalarRepr {
    if value.is_empty() {
        return ScalarRepr::Inline("''".to_string());
    }

    if value.contains('\n') {
        return match literal_block(value) {
            Some(block) => block,
            None => ScalarRepr::Inline(double_quoted(value)),
        };
    }

    if value.chars().any(char::is_control) {
        return ScalarRepr::Inline(double_quoted(value));
    }

    if is_ambiguous(value) || !is_plain_safe(value) {
        return ScalarRepr::Inline(single_quoted(value));
    }

    ScalarRepr::Inline(value.to_string())
}

/// Format a string as a YAML scalar, quoting only when needed.
///
/// Block scalars are returned with their body indented by two spaces.
///
/// # Examples
///
/// ```
/// use i18n_report::core::yaml::quote;
///
/// assert_eq!(quote(""), "''");
/// assert_eq!(quote("hello world"), "hello world");
/// assert_eq!(quote("yes"), "'yes'");
/// assert_eq!(quote("key: value"), "'key: value'");
/// assert_eq!(quote("has {var}"), "has {var}");
/// ```
pub fn quote(value: &str) -> String {
    match render(value) {
        ScalarRepr::Inline(text) => text,
        ScalarRepr::Block { header, lines } => {
            let mut out = header;
            for line in lines {
                out.push('\n');
                if !line.is_empty() {
                    out.push_str("  ");
                    out.push_str(&line);
                }
            }
            out
        }
    }
}

/// Format a mapping key. Keys stay plain unless the plain form would not
/// parse back as the same text; numeric-looking keys are left alone.
pub fn key_token(key: &str) -> String {
    if !key.is_empty() && !key.chars().any(char::is_control) && is_plain_safe(key) {
        key.to_string()
    } else if key.chars().any(char::is_control) {
        double_quoted(key)
    } else {
        single_quoted(key)
    }
}

/// Remove one layer of YAML quotes from a value.
///
/// Single-quoted text has `''` collapsed to `'`; double-quoted text has
/// `\"` and `\\` unescaped. Anything else, including a lone quote
/// character, is returned unchanged.
///
/// # Examples
///
/// ```
/// use i18n_report::core::yaml::unquote;
///
/// assert_eq!(unquote("'it''s'"), "it's");
/// assert_eq!(unquote(r#""es\"caped""#), r#"es"caped"#);
/// assert_eq!(unquote("plain"), "plain");
/// assert_eq!(unquote("'"), "'");
/// ```
pub fn unquote(value: &str) -> String {
    if let Some(inner) = strip_pair(value, '\'') {
        return inner.replace("''", "'");
    }
    if let Some(inner) = strip_pair(value, '"') {
        return unescape_double(inner);
    }
    value.to_string()
}

fn strip_pair(value: &str, quote: char) -> Option<&str> {
    if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

fn unescape_double(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// True when a plain scalar would be resolved to a non-string value.
fn is_ambiguous(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    if matches!(
        lower.as_str(),
        "y" | "n" | "yes" | "no" | "true" | "false" | "on" | "off" | "null" | "~" | "<<" | "="
    ) {
        return true;
    }
    INT_REGEX.is_match(value) || FLOAT_REGEX.is_match(value) || TIMESTAMP_REGEX.is_match(value)
}

/// True when `value` can be written as a plain scalar in block context.
fn is_plain_safe(value: &str) -> bool {
    if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
        return false;
    }

    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    match first {
        '-' | '?' | ':' => {
            if chars.next().is_none_or(char::is_whitespace) {
                return false;
            }
        }
        ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%'
        | '@' | '`' => return false,
        _ => {}
    }

    if value == "---" || value == "..." {
        return false;
    }

    !(value.contains(": ")
        || value.contains(" #")
        || value.ends_with(':')
        || value.contains('\u{feff}'))
}

fn single_quoted(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Literal block for multi-line text, or `None` when the text needs escapes.
fn literal_block(value: &str) -> Option<ScalarRepr> {
    if value.chars().any(|c| c.is_control() && c != '\n') {
        return None;
    }

    let trailing = value.len() - value.trim_end_matches('\n').len();
    let header = match trailing {
        0 => "|-",
        1 => "|",
        _ => return None,
    };

    let body = value.trim_end_matches('\n');
    let lines: Vec<String> = body.split('\n').map(str::to_string).collect();

    // The first content line fixes the block indentation, so it must not
    // start with a space; whitespace-only lines would break detection too.
    let first_content = lines.iter().find(|l| !l.is_empty())?;
    if first_content.starts_with(' ') {
        return None;
    }
    if lines.iter().any(|l| !l.is_empty() && l.trim().is_empty()) {
        return None;
    }

    Some(ScalarRepr::Block {
        header: header.to_string(),
        lines,
    })
}
