//! Dynamic key patterns.
//!
//! Source code sometimes builds a key at runtime, e.g.
//! `` t(`containerEngine.options.${ engine }.label`) ``. The front end
//! splits such a template into its literal fragments; this module turns the
//! fragments into a matcher over real catalog keys where each placeholder
//! stands for exactly one key segment.

use std::collections::BTreeSet;

use regex::Regex;

/// Marker used in place of each placeholder in the display form.
pub const PLACEHOLDER_MARKER: &str = "{}";

/// Characters a placeholder may absorb: one key segment.
const SEGMENT_PATTERN: &str = "[A-Za-z0-9_-]+";

/// A compiled template with placeholders.
#[derive(Debug, Clone)]
pub struct DynamicPattern {
    fragments: Vec<String>,
    display: String,
    matcher: Regex,
}

impl DynamicPattern {
    /// Compile literal fragments separated by placeholders.
    ///
    /// `fragments` holds the text around the placeholders, so a template
    /// with `n` placeholders has `n + 1` fragments (some possibly empty).
    /// Returns `None` unless the template looks like a key: at least one
    /// placeholder, a non-empty leading fragment, at least one dot, and
    /// nothing but key characters and dots in the literal text.
    ///
    /// # Examples
    ///
    /// ```
    /// use i18n_report::core::DynamicPattern;
    ///
    /// let pattern = DynamicPattern::from_fragments(&["asyncButton.", ".", "Icon"]).unwrap();
    /// assert_eq!(pattern.display(), "asyncButton.{}.{}Icon");
    /// assert!(pattern.matches("asyncButton.edit.actionIcon"));
    /// assert!(!pattern.matches("asyncButton.edit.action"));
    ///
    /// assert!(DynamicPattern::from_fragments(&["http://", "/api"]).is_none());
    /// ```
    pub fn from_fragments<S: AsRef<str>>(fragments: &[S]) -> Option<Self> {
        let fragments: Vec<String> = fragments.iter().map(|f| f.as_ref().to_string()).collect();

        if fragments.len() < 2 || fragments[0].is_empty() {
            return None;
        }
        if !fragments.iter().any(|f| f.contains('.')) {
            return None;
        }
        if !fragments.iter().all(|f| f.chars().all(is_template_char)) {
            return None;
        }

        let mut regex = String::from("^");
        for (i, fragment) in fragments.iter().enumerate() {
            if i > 0 {
                regex.push_str(SEGMENT_PATTERN);
            }
            regex.push_str(&regex::escape(fragment));
        }
        regex.push('$');
        let matcher = Regex::new(&regex).ok()?;

        let display = fragments.join(PLACEHOLDER_MARKER);
        Some(Self {
            fragments,
            display,
            matcher,
        })
    }

    /// Human-readable form with every placeholder shown as `{}`.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Whether `key` fits the template.
    pub fn matches(&self, key: &str) -> bool {
        self.matcher.is_match(key)
    }
}

fn is_template_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Keys accepted by at least one pattern.
pub fn resolve_dynamic_keys<'a, I>(patterns: &[DynamicPattern], keys: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    keys.into_iter()
        .filter(|key| patterns.iter().any(|p| p.matches(key)))
        .map(String::from)
        .collect()
}
