use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::super::{args::MergeCommand, exit_status::ExitStatus, report::print_status};
use crate::core::{
    Catalog, ReportContext,
    merge::{extract_translation_text, parse_merge_input},
};

pub fn merge(cmd: MergeCommand) -> Result<ExitStatus> {
    let ctx = ReportContext::new(&cmd.common)?;
    let locale_path = ctx.locale_path(&cmd.locale);

    let mut catalog = Catalog::load_or_empty(&locale_path)?;
    let input = read_input(&cmd.files)?;

    let entries = parse_merge_input(&input);
    if entries.is_empty() {
        bail!("no translation entries found in input");
    }
    debug!(entries = entries.len(), "parsed merge input");

    let added = catalog.merge(entries);
    if let Some(parent) = locale_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&locale_path, catalog.to_yaml())
        .with_context(|| format!("Failed to write file: {}", locale_path.display()))?;

    print_status(&format!(
        "Merged {} new keys into {} (total: {} keys)",
        added,
        ctx.relative(&locale_path),
        catalog.len()
    ));
    Ok(ExitStatus::Success)
}

/// Translated text from the given files, or from standard input.
fn read_input(files: &[PathBuf]) -> Result<String> {
    if files.is_empty() {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read standard input")?;
        return Ok(extract_translation_text(&raw));
    }

    let mut combined = String::new();
    for path in files {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        combined.push_str(&extract_translation_text(&raw));
    }
    Ok(combined)
}
