//! Unused translation key detection rule.
//!
//! Detects keys that are defined in the reference catalog but neither
//! referenced in source code nor covered by a dynamic key pattern.

use anyhow::Result;

use crate::core::{Catalog, ReportContext, ScanResult};

pub fn check_unused_keys_issues(ctx: &ReportContext) -> Result<Vec<String>> {
    let reference = ctx.reference_catalog()?;
    let scan = ctx.scan()?;
    Ok(check_unused_keys(reference, scan))
}

/// Check for unused translation keys.
///
/// # Arguments
/// * `reference` - The reference locale catalog
/// * `scan` - References and dynamic keys found in source code
///
/// # Returns
/// Unused keys in ascending order
pub fn check_unused_keys(reference: &Catalog, scan: &ScanResult) -> Vec<String> {
    reference
        .keys()
        .filter(|key| !scan.is_used(key))
        .map(String::from)
        .collect()
}
