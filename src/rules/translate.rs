//! Translation work list.
//!
//! Lists the reference entries a target locale still lacks, limited to keys
//! the application actually uses (referenced directly or through a dynamic
//! pattern). The list can be split into batches for parallel translation.

use std::ops::Range;

use anyhow::{Result, bail};

use crate::core::{Catalog, CatalogEntry, ReportContext, ScanResult};

/// One slice of a batched work list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// 1-based batch number.
    pub index: usize,
    /// Total number of batches.
    pub count: usize,
}

impl Batch {
    /// Validate a batch request.
    pub fn new(index: usize, count: usize) -> Result<Self> {
        if count == 0 || index < 1 || index > count {
            bail!("--batch must be between 1 and {}", count);
        }
        Ok(Self { index, count })
    }

    /// Item range of this batch in a list of `total` items.
    ///
    /// Batches have `ceil(total / count)` items; trailing batches may be
    /// short or empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use i18n_report::rules::translate::Batch;
    ///
    /// assert_eq!(Batch::new(1, 3).unwrap().range(10), 0..4);
    /// assert_eq!(Batch::new(3, 3).unwrap().range(10), 8..10);
    /// ```
    pub fn range(&self, total: usize) -> Range<usize> {
        let size = total.div_ceil(self.count);
        let start = ((self.index - 1) * size).min(total);
        let end = (start + size).min(total);
        start..end
    }
}

pub fn check_translate_issues(
    ctx: &ReportContext,
    locale: &str,
    batch: Option<Batch>,
) -> Result<Vec<CatalogEntry>> {
    let reference = ctx.reference_catalog()?;
    let target = ctx.load_locale(locale)?;
    let scan = ctx.scan()?;

    let entries = check_translate(reference, &target, scan);
    Ok(match batch {
        Some(batch) => select_batch(entries, batch),
        None => entries,
    })
}

/// Reference entries missing from `target` whose key is used.
///
/// Entries keep the reference value and comment, in ascending key order.
pub fn check_translate(
    reference: &Catalog,
    target: &Catalog,
    scan: &ScanResult,
) -> Vec<CatalogEntry> {
    reference
        .entries()
        .filter(|entry| !target.contains_key(&entry.key) && scan.is_used(&entry.key))
        .cloned()
        .collect()
}

/// Keep only the items of `batch`.
pub fn select_batch<T>(items: Vec<T>, batch: Batch) -> Vec<T> {
    let range = batch.range(items.len());
    items
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect()
}
