use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::core::yaml::Document;

/// A locale file editor that deletes keys by their dotted paths.
///
/// The document keeps its key order and comments; output uses 2-space
/// indentation with a blank line between top-level groups.
pub struct YamlEditor {
    file_path: PathBuf,
    document: Document,
}

impl YamlEditor {
    /// Open a locale file for editing.
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let document = Document::parse(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;
        Ok(Self {
            file_path: path.to_path_buf(),
            document,
        })
    }

    /// Delete keys by their full dotted paths (e.g., "tray.preferences").
    ///
    /// Mappings left empty by a deletion are removed as well, up to but not
    /// including the document root. Returns the number of keys removed.
    pub fn delete_keys(&mut self, keys: &BTreeSet<String>) -> usize {
        keys.iter()
            .filter(|key| self.document.remove_key(key))
            .count()
    }

    /// Save the document back to the file.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.file_path, self.document.to_yaml())
            .with_context(|| format!("Failed to write file: {}", self.file_path.display()))
    }

    /// Get the serialized document (for testing).
    #[cfg(test)]
    pub fn content(&self) -> String {
        self.document.to_yaml()
    }
}

/// Remove `keys` from the file at `path`.
///
/// The file is rewritten only when at least one key was removed.
pub fn remove_keys_from_file(path: &Path, keys: &BTreeSet<String>) -> Result<usize> {
    let mut editor = YamlEditor::open(path)?;
    let removed = editor.delete_keys(keys);
    if removed > 0 {
        editor.save()?;
    }
    Ok(removed)
}
