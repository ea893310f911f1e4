//! Dynamic key pattern report.
//!
//! Lists every distinct template-literal key pattern found in source, where
//! it was first seen, and the reference keys it covers.

use anyhow::Result;
use serde::Serialize;

use crate::core::{Catalog, ReportContext, ScanResult};

/// One dynamic pattern and the keys it matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamicPatternReport {
    /// Display form, e.g. `containerEngine.options.{}.label`.
    pub pattern: String,
    /// `file:line` of the first occurrence.
    pub source: String,
    pub matches: Vec<String>,
}

pub fn check_dynamic_issues(ctx: &ReportContext) -> Result<Vec<DynamicPatternReport>> {
    let reference = ctx.reference_catalog()?;
    let scan = ctx.scan()?;
    Ok(check_dynamic(reference, scan))
}

/// Build the report, sorted by display form.
pub fn check_dynamic(reference: &Catalog, scan: &ScanResult) -> Vec<DynamicPatternReport> {
    scan.dynamic_patterns
        .iter()
        .map(|dynamic| DynamicPatternReport {
            pattern: dynamic.pattern.display().to_string(),
            source: dynamic.source.to_string(),
            matches: reference
                .keys()
                .filter(|key| dynamic.pattern.matches(key))
                .map(String::from)
                .collect(),
        })
        .collect()
}
