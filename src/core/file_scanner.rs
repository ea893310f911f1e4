use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

use crate::{config::Config, utils::relative_display};

/// Result of collecting source files.
#[derive(Debug, Default)]
pub struct SourceFiles {
    /// Files to scan, sorted by path.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Collect the source files to scan under `root`.
///
/// Walks the configured source directory, skipping excluded directory
/// names and files matching an `ignores` glob (matched against the
/// repo-relative path), and keeps files with a configured extension.
/// Configured root-level files are added when they exist.
pub fn scan_source_files(root: &Path, config: &Config) -> Result<SourceFiles> {
    let source_dir = root.join(&config.source_dir);
    if !source_dir.is_dir() {
        bail!("Source directory not found: {}", source_dir.display());
    }

    let ignores = config
        .ignores
        .iter()
        .map(|p| {
            Pattern::new(p).with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))
        })
        .collect::<Result<Vec<_>>>()?;
    let is_ignored =
        |path: &Path| -> bool { ignores.iter().any(|p| p.matches(&relative_display(root, path))) };

    let excluded: HashSet<&str> = config.excluded_dirs.iter().map(String::as_str).collect();
    let extensions: HashSet<&str> = config.extensions.iter().map(String::as_str).collect();

    let mut files = Vec::new();
    let mut skipped_count = 0;

    let walker = WalkDir::new(&source_dir).into_iter().filter_entry(|entry| {
        !(entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| excluded.contains(name)))
    });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                debug!("cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file() && has_extension(path, &extensions) && !is_ignored(path) {
            files.push(path.to_path_buf());
        }
    }

    for name in &config.extra_sources {
        let path = root.join(name);
        if !path.is_file() {
            debug!("extra source not found: {}", path.display());
        } else if !is_ignored(&path) {
            files.push(path);
        }
    }

    files.sort();
    files.dedup();

    debug!(
        files = files.len(),
        skipped = skipped_count,
        "collected source files"
    );
    Ok(SourceFiles {
        files,
        skipped_count,
    })
}

fn has_extension(path: &Path, extensions: &HashSet<&str>) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(ext))
}
