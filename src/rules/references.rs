//! Where each reference catalog key is used.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::core::{Catalog, KeyReference, ReportContext, ScanResult};

pub fn check_references_issues(
    ctx: &ReportContext,
) -> Result<BTreeMap<String, Vec<KeyReference>>> {
    let reference = ctx.reference_catalog()?;
    let scan = ctx.scan()?;
    Ok(collect_references(reference, scan))
}

/// Catalog keys with at least one direct reference, with their locations.
pub fn collect_references(
    reference: &Catalog,
    scan: &ScanResult,
) -> BTreeMap<String, Vec<KeyReference>> {
    reference
        .keys()
        .filter_map(|key| {
            let refs = scan.references(key);
            (!refs.is_empty()).then(|| (key.to_string(), refs.to_vec()))
        })
        .collect()
}
