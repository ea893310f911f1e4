//! Stale translation key detection rule.
//!
//! Detects keys that remain in a target locale after they were removed
//! from the reference catalog.

use anyhow::Result;

use crate::core::{Catalog, ReportContext};

pub fn check_stale_keys_issues(ctx: &ReportContext, locale: &str) -> Result<Vec<String>> {
    let reference = ctx.reference_catalog()?;
    let target = ctx.load_locale(locale)?;
    Ok(check_stale_keys(reference, &target))
}

/// Keys present in `target` but absent from `reference`, ascending.
pub fn check_stale_keys(reference: &Catalog, target: &Catalog) -> Vec<String> {
    target.keys_missing_from(reference).into_iter().collect()
}
