//! Flat catalog model for one locale.
//!
//! A catalog maps dotted keys to their value and the comment block written
//! above the key in the locale file. Every catalog is loaded through
//! [`Document`], so comments are always available; reports that only
//! compare key sets simply ignore them.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use super::yaml::{Document, unflatten};

/// One translation: dotted key, value, and optional comment lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub key: String,
    pub value: String,
    /// Comment lines (each starting with `#`) joined with `\n`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CatalogEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = (!comment.is_empty()).then_some(comment);
        self
    }
}

/// All entries of one locale, keyed and ordered by dotted key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog; later entries win over earlier ones with the same key.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry);
        }
        catalog
    }

    /// Load a locale file, keeping the comment above each leaf.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let document = Document::parse(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;
        Ok(Self::from_entries(document.flatten_with_comments()))
    }

    /// Load a locale file, treating a missing file as an empty catalog.
    pub fn load_or_empty(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Insert an entry, replacing any entry with the same key.
    pub fn insert(&mut self, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.entries.insert(entry.key.clone(), entry)
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in ascending key order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `incoming` into this catalog.
    ///
    /// Incoming entries replace existing ones wholesale, comment included.
    /// An incoming key also replaces existing keys nested under it and the
    /// existing leaf it would nest under, since one path cannot hold both a
    /// value and child keys. Entries that are not mentioned keep their value
    /// and comment. Returns the number of keys that were not present before.
    pub fn merge<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut added = 0;
        for entry in incoming {
            for replaced in self.remove_path_conflicts(&entry.key) {
                warn!(key = %entry.key, %replaced, "merged key replaces a conflicting key");
            }
            if self.insert(entry).is_none() {
                added += 1;
            }
        }
        added
    }

    /// Remove the entries that are a parent path or a child path of `key`.
    fn remove_path_conflicts(&mut self, key: &str) -> Vec<String> {
        let mut conflicts: Vec<String> = key
            .match_indices('.')
            .map(|(idx, _)| &key[..idx])
            .filter(|parent| self.entries.contains_key(*parent))
            .map(String::from)
            .collect();

        let child_prefix = format!("{}.", key);
        conflicts.extend(
            self.entries
                .range(child_prefix.clone()..)
                .map(|(child, _)| child)
                .take_while(|child| child.starts_with(&child_prefix))
                .cloned(),
        );

        for conflict in &conflicts {
            self.entries.remove(conflict);
        }
        conflicts
    }

    /// Keys of this catalog that are absent from `other`, ascending.
    pub fn keys_missing_from(&self, other: &Catalog) -> BTreeSet<String> {
        self.keys()
            .filter(|key| !other.contains_key(key))
            .map(String::from)
            .collect()
    }

    /// Serialize as a nested, sorted locale file.
    pub fn to_yaml(&self) -> String {
        unflatten(self.entries.values())
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}
