//! Report rules.
//!
//! This module contains pure functions over a catalog and a source scan.
//! Each `check_*` function takes only the specific inputs it needs (not a
//! full context); the `check_*_issues` wrappers pull those inputs from a
//! [`ReportContext`](crate::core::ReportContext).
//!
//! ## Module Structure
//!
//! - `unused`: Reference keys never used in source
//! - `missing`: Reference keys absent from a locale
//! - `stale`: Locale keys absent from the reference catalog
//! - `translate`: Used keys a locale still needs, with batching
//! - `references`: Source locations of each key
//! - `dynamic`: Template-literal key patterns and their matches
//! - `check`: Combined pass/fail counts

pub mod check;
pub mod dynamic;
pub mod missing;
pub mod references;
pub mod stale;
pub mod translate;
pub mod unused;
