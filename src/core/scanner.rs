//! Source key-reference scanner.
//!
//! Source files are treated as plain text. Every line is run through all
//! extractors (not first-match), so one line can reference several keys:
//!
//! - translation calls: `t('a.b')`, `this.t("a.b")`, `` $t(`a.b`) ``
//! - key properties: `labelKey: 'a.b'`, plus every dotted string literal
//!   on such a line (ternaries pick between keys)
//! - markup: `label-key="a.b"` attributes and `v-t="'a.b'"` directives
//! - indirect assignments: `name: 'a.b'`, counted only when the value is a
//!   catalog key
//! - template literals with placeholders, compiled into [`DynamicPattern`]s
//!   and resolved against the catalog once all files are scanned

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::{
    catalog::Catalog,
    pattern::{DynamicPattern, resolve_dynamic_keys},
};
use crate::utils::relative_display;

/// `t('key')`, `t("key")`, `` t(`key`) ``, also `this.t(...)` and `$t(...)`.
static KEY_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|[^a-zA-Z])t\(['"`]([a-zA-Z0-9_.]+)['"`]"#).unwrap());

/// Quoted dotted literals such as `'tray.preferences'`.
static DOTTED_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"]([a-z][a-zA-Z0-9]*(?:\.[a-z][a-zA-Z0-9]*)+)['"]"#).unwrap()
});

/// Markup attributes ending in `-key`, e.g. `no-rows-key="..."`.
static KEY_ATTRIBUTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[a-z]+-key="([a-zA-Z0-9_.]+)""#).unwrap());

/// `v-t="'key'"` directives.
static VT_DIRECTIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"v-t="'([a-zA-Z0-9_.]+)'""#).unwrap());

/// `name: 'a.b'` or `'quoted name': "a.b"` assignments.
static INDIRECT_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\b\w+|'[^']+'):\s+['"]([a-z][a-zA-Z0-9]*(?:\.[a-z][a-zA-Z0-9]*)+)['"]"#)
        .unwrap()
});

/// Single-line template literals.
static TEMPLATE_LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]*)`").unwrap());

/// `${...}` placeholders inside a template literal.
static TEMPLATE_PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^}]*\}").unwrap());

/// Where a key is referenced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct KeyReference {
    /// Path relative to the repository root, `/`-separated.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
}

impl std::fmt::Display for KeyReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A dynamic pattern and the first place it was seen.
#[derive(Debug, Clone)]
pub struct DynamicReference {
    pub pattern: DynamicPattern,
    pub source: KeyReference,
}

/// Matches found in one file, in line order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FileMatches {
    /// `(key, line)` pairs.
    pub keys: Vec<(String, usize)>,
    /// Template fragments and their line.
    pub templates: Vec<(Vec<String>, usize)>,
}

/// Extractors for key references in one line of source text.
pub struct KeyScanner {
    key_property: Option<Regex>,
    key_property_line: Option<Regex>,
}

impl KeyScanner {
    /// Build a scanner recognizing the given key property names
    /// (e.g. `titleKey`, `labelKey`).
    pub fn new(key_properties: &[String]) -> Result<Self> {
        if key_properties.is_empty() {
            return Ok(Self {
                key_property: None,
                key_property_line: None,
            });
        }

        let names = key_properties
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        let key_property = Regex::new(&format!(
            r#"(?:{}):\s*['"]([a-zA-Z0-9_.]+)['"]"#,
            names
        ))
        .context("Failed to compile key property pattern")?;
        let key_property_line = Regex::new(&format!(r"(?:{})[:\s=]", names))
            .context("Failed to compile key property pattern")?;

        Ok(Self {
            key_property: Some(key_property),
            key_property_line: Some(key_property_line),
        })
    }

    /// Scan file content. Indirect assignments are kept only when the value
    /// is a key of `catalog`.
    pub fn scan_source(&self, content: &str, catalog: &Catalog) -> FileMatches {
        let mut matches = FileMatches::default();

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let mut record = |key: &str| matches.keys.push((key.to_string(), line_no));

            for regex in [&*KEY_CALL_REGEX, &*KEY_ATTRIBUTE_REGEX, &*VT_DIRECTIVE_REGEX]
                .into_iter()
                .chain(self.key_property.as_ref())
            {
                for caps in regex.captures_iter(line) {
                    record(&caps[1]);
                }
            }

            if self
                .key_property_line
                .as_ref()
                .is_some_and(|r| r.is_match(line))
            {
                for caps in DOTTED_LITERAL_REGEX.captures_iter(line) {
                    record(&caps[1]);
                }
            }

            for caps in INDIRECT_KEY_REGEX.captures_iter(line) {
                if catalog.contains_key(&caps[1]) {
                    record(&caps[1]);
                }
            }

            for caps in TEMPLATE_LITERAL_REGEX.captures_iter(line) {
                if let Some(fragments) = template_fragments(&caps[1]) {
                    matches.templates.push((fragments, line_no));
                }
            }
        }

        matches
    }
}

/// Split a template literal body on its `${...}` placeholders.
///
/// Returns `None` when the body has no placeholder.
pub fn template_fragments(body: &str) -> Option<Vec<String>> {
    let mut fragments = Vec::new();
    let mut last = 0;
    for placeholder in TEMPLATE_PLACEHOLDER_REGEX.find_iter(body) {
        fragments.push(body[last..placeholder.start()].to_string());
        last = placeholder.end();
    }
    if fragments.is_empty() {
        return None;
    }
    fragments.push(body[last..].to_string());
    Some(fragments)
}

/// Everything learned from one scan of the source tree.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Key → references, ordered by file then line.
    pub references: BTreeMap<String, Vec<KeyReference>>,
    /// Distinct dynamic patterns (by display form), sorted by display form.
    pub dynamic_patterns: Vec<DynamicReference>,
    /// Catalog keys accepted by any dynamic pattern.
    pub dynamic_keys: BTreeSet<String>,
    pub files_scanned: usize,
    /// Files that could not be read.
    pub unreadable_count: usize,
}

impl ScanResult {
    pub fn references(&self, key: &str) -> &[KeyReference] {
        self.references
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_referenced(&self, key: &str) -> bool {
        !self.references(key).is_empty()
    }

    pub fn is_dynamic(&self, key: &str) -> bool {
        self.dynamic_keys.contains(key)
    }

    /// Referenced directly or covered by a dynamic pattern.
    pub fn is_used(&self, key: &str) -> bool {
        self.is_referenced(key) || self.is_dynamic(key)
    }
}

/// Scan `files` for references to keys of `catalog`.
///
/// Files are read and scanned in parallel; per-file results are merged in
/// file order so reference lists are deterministic. Unreadable files are
/// skipped.
pub fn scan_references(
    root: &Path,
    files: &[PathBuf],
    scanner: &KeyScanner,
    catalog: &Catalog,
) -> ScanResult {
    let per_file: Vec<Option<(String, FileMatches)>> = files
        .par_iter()
        .map(|path| match fs::read_to_string(path) {
            Ok(content) => Some((
                relative_display(root, path),
                scanner.scan_source(&content, catalog),
            )),
            Err(e) => {
                debug!("skipping unreadable file {}: {}", path.display(), e);
                None
            }
        })
        .collect();

    let mut result = ScanResult {
        files_scanned: files.len(),
        ..Default::default()
    };
    let mut patterns: BTreeMap<String, DynamicReference> = BTreeMap::new();

    for item in per_file {
        let Some((file, matches)) = item else {
            result.unreadable_count += 1;
            continue;
        };

        for (key, line) in matches.keys {
            let reference = KeyReference {
                file: file.clone(),
                line,
            };
            let refs = result.references.entry(key).or_default();
            if refs.last() != Some(&reference) {
                refs.push(reference);
            }
        }

        for (fragments, line) in matches.templates {
            let Some(pattern) = DynamicPattern::from_fragments(&fragments) else {
                continue;
            };
            patterns
                .entry(pattern.display().to_string())
                .or_insert_with(|| DynamicReference {
                    pattern,
                    source: KeyReference {
                        file: file.clone(),
                        line,
                    },
                });
        }
    }

    result.dynamic_patterns = patterns.into_values().collect();
    let compiled: Vec<DynamicPattern> = result
        .dynamic_patterns
        .iter()
        .map(|d| d.pattern.clone())
        .collect();
    result.dynamic_keys = resolve_dynamic_keys(&compiled, catalog.keys());

    debug!(
        files = result.files_scanned,
        keys = result.references.len(),
        patterns = result.dynamic_patterns.len(),
        dynamic_keys = result.dynamic_keys.len(),
        "scanned source files"
    );
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::core::CatalogEntry;

    fn scanner() -> KeyScanner {
        KeyScanner::new(&[
            "titleKey".to_string(),
            "descriptionKey".to_string(),
            "labelKey".to_string(),
        ])
        .unwrap()
    }

    fn catalog(keys: &[&str]) -> Catalog {
        keys.iter().map(|k| CatalogEntry::new(*k, "value")).collect()
    }

    fn keys_of(matches: &FileMatches) -> Vec<(&str, usize)> {
        matches
            .keys
            .iter()
            .map(|(k, l)| (k.as_str(), *l))
            .collect()
    }

    #[test]
    fn test_translation_calls() {
        let source = r#"
const a = t('action.refresh');
const b = this.t("tray.preferences");
const c = $t(`containerEngine.label`);
const d = format('not.a.call');
const e = it('test.name');
"#;
        let matches = scanner().scan_source(source, &Catalog::new());
        assert_eq!(
            keys_of(&matches),
            vec![
                ("action.refresh", 2),
                ("tray.preferences", 3),
                ("containerEngine.label", 4),
            ]
        );
    }

    #[test]
    fn test_key_properties_and_ternaries() {
        let source = "{ labelKey: 'nav.general' }\n\
                      titleKey: isAdmin ? 'nav.admin' : 'nav.user',\n\
                      descriptionKey = \"nav.help\";\n";
        let matches = scanner().scan_source(source, &Catalog::new());
        assert_eq!(
            keys_of(&matches),
            vec![
                ("nav.general", 1),
                ("nav.general", 1),
                ("nav.admin", 2),
                ("nav.user", 2),
                ("nav.help", 3),
            ]
        );
    }

    #[test]
    fn test_markup_attributes_and_directives() {
        let source = r#"<sortable-table no-rows-key="images.noRows" />
<span v-t="'preferences.title'" />"#;
        let matches = scanner().scan_source(source, &Catalog::new());
        assert_eq!(
            keys_of(&matches),
            vec![("images.noRows", 1), ("preferences.title", 2)]
        );
    }

    #[test]
    fn test_indirect_references_require_catalog_key() {
        let source = "bar: 'product.kubernetesVersion',\nsetting: 'kubernetes.version',\n";
        let matches = scanner().scan_source(source, &catalog(&["product.kubernetesVersion"]));
        assert_eq!(keys_of(&matches), vec![("product.kubernetesVersion", 1)]);
    }

    #[test]
    fn test_custom_key_properties() {
        let scanner = KeyScanner::new(&["headingKey".to_string()]).unwrap();
        let matches = scanner.scan_source("headingKey: 'page.heading'", &Catalog::new());
        assert_eq!(
            keys_of(&matches),
            vec![("page.heading", 1), ("page.heading", 1)]
        );

        let scanner = KeyScanner::new(&[]).unwrap();
        let matches = scanner.scan_source("labelKey: 'page.heading'", &Catalog::new());
        assert!(matches.keys.is_empty());
    }

    #[test]
    fn test_template_literals() {
        let source = "t(`containerEngine.options.${ engine }.label`);\nconst plain = `no placeholders`;\n";
        let matches = scanner().scan_source(source, &Catalog::new());
        assert_eq!(
            matches.templates,
            vec![(
                vec!["containerEngine.options.".to_string(), ".label".to_string()],
                1
            )]
        );
    }

    #[test]
    fn test_template_fragments() {
        assert_eq!(
            template_fragments("asyncButton.${mode}.${phase}Icon"),
            Some(vec![
                "asyncButton.".to_string(),
                ".".to_string(),
                "Icon".to_string()
            ])
        );
        assert_eq!(
            template_fragments("a.${x}"),
            Some(vec!["a.".to_string(), String::new()])
        );
        assert_eq!(template_fragments("plain text"), None);
    }

    #[test]
    fn test_scan_references_merges_in_file_order() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("b.ts"), "t('tray.preferences');\n").unwrap();
        fs::write(
            root.join("a.vue"),
            "<span>{{ t('tray.preferences') }}</span>\n\n\
             labelKey: 'tray.preferences'\n\
             t(`containerEngine.options.${x}.label`)\n",
        )
        .unwrap();

        let catalog = catalog(&[
            "tray.preferences",
            "containerEngine.options.moby.label",
            "containerEngine.label",
        ]);
        let files = vec![root.join("a.vue"), root.join("b.ts"), root.join("missing.ts")];
        let result = scan_references(root, &files, &scanner(), &catalog);

        let refs: Vec<String> = result
            .references("tray.preferences")
            .iter()
            .map(|r| r.to_string())
            .collect();
        assert_eq!(refs, vec!["a.vue:1", "a.vue:3", "b.ts:1"]);

        assert_eq!(result.dynamic_patterns.len(), 1);
        assert_eq!(
            result.dynamic_patterns[0].pattern.display(),
            "containerEngine.options.{}.label"
        );
        assert_eq!(result.dynamic_patterns[0].source.to_string(), "a.vue:4");

        assert!(result.is_dynamic("containerEngine.options.moby.label"));
        assert!(result.is_used("containerEngine.options.moby.label"));
        assert!(!result.is_used("containerEngine.label"));
        assert_eq!(result.files_scanned, 3);
        assert_eq!(result.unreadable_count, 1);
    }
}
