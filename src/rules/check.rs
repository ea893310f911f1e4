//! Combined lint check: unused, stale and untranslated-but-used keys.

use anyhow::Result;

use super::{stale::check_stale_keys, translate::check_translate, unused::check_unused_keys};
use crate::core::{Catalog, ReportContext, ScanResult};

/// Result of one check category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub label: String,
    pub count: usize,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.count == 0
    }
}

pub fn check_all_issues(ctx: &ReportContext, locale: &str) -> Result<Vec<CheckOutcome>> {
    let reference = ctx.reference_catalog()?;
    let target = ctx.load_locale(locale)?;
    let scan = ctx.scan()?;
    Ok(check_all(reference, &target, scan, locale))
}

/// Count unused keys, stale keys in `locale`, and used keys missing from it.
pub fn check_all(
    reference: &Catalog,
    target: &Catalog,
    scan: &ScanResult,
    locale: &str,
) -> Vec<CheckOutcome> {
    vec![
        CheckOutcome {
            label: "unused keys".to_string(),
            count: check_unused_keys(reference, scan).len(),
        },
        CheckOutcome {
            label: format!("stale keys in {}", locale),
            count: check_stale_keys(reference, target).len(),
        },
        CheckOutcome {
            label: format!("used keys missing from {}", locale),
            count: check_translate(reference, target, scan).len(),
        },
    ]
}
