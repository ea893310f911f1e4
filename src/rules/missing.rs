//! Missing translation key detection rule.
//!
//! Detects keys of the reference catalog that a target locale lacks.

use anyhow::Result;

use crate::core::{Catalog, ReportContext};

pub fn check_missing_keys_issues(ctx: &ReportContext, locale: &str) -> Result<Vec<String>> {
    let reference = ctx.reference_catalog()?;
    let target = ctx.load_locale(locale)?;
    Ok(check_missing_keys(reference, &target))
}

/// Keys present in `reference` but absent from `target`, ascending.
pub fn check_missing_keys(reference: &Catalog, target: &Catalog) -> Vec<String> {
    reference.keys_missing_from(target).into_iter().collect()
}
