use std::{
    collections::BTreeSet,
    io::{self, Read},
};

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::super::{args::RemoveCommand, exit_status::ExitStatus, report::print_status};
use crate::{
    core::{Catalog, ReportContext},
    utils::is_valid_dotted_key,
    yaml_editor::remove_keys_from_file,
};

pub fn remove(cmd: RemoveCommand) -> Result<ExitStatus> {
    let ctx = ReportContext::new(&cmd.common)?;
    if cmd.stale {
        remove_stale(&ctx)?;
    } else {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read standard input")?;
        remove_listed(&ctx, &parse_key_list(&input))?;
    }
    Ok(ExitStatus::Success)
}

/// Valid dotted keys from a newline-separated list; anything else is dropped,
/// so report output can be piped in directly.
fn parse_key_list(input: &str) -> BTreeSet<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| is_valid_dotted_key(line))
        .map(String::from)
        .collect()
}

fn remove_listed(ctx: &ReportContext, keys: &BTreeSet<String>) -> Result<()> {
    if keys.is_empty() {
        bail!("no valid keys provided on stdin");
    }
    debug!(keys = keys.len(), "removing keys from every locale file");

    for path in ctx.translation_files()? {
        let removed = remove_keys_from_file(&path, keys)?;
        if removed > 0 {
            print_status(&format!("Removed {} keys from {}", removed, ctx.relative(&path)));
        }
    }
    Ok(())
}

fn remove_stale(ctx: &ReportContext) -> Result<()> {
    let reference = ctx.reference_catalog()?;

    for path in ctx.translation_files()? {
        if ctx.is_reference_file(&path) {
            continue;
        }
        let stale = Catalog::load(&path)?.keys_missing_from(reference);
        if stale.is_empty() {
            continue;
        }
        let removed = remove_keys_from_file(&path, &stale)?;
        if removed > 0 {
            print_status(&format!(
                "Removed {} stale keys from {}",
                removed,
                ctx.relative(&path)
            ));
        }
    }
    Ok(())
}
