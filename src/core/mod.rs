//! Core engine: catalog model, YAML engine and source scanning.
//!
//! ## Module Structure
//!
//! - `catalog`: Flat catalog of dotted keys with values and comments
//! - `yaml`: Comment-preserving YAML flatten/unflatten and scalar quoting
//! - `pattern`: Dynamic key patterns compiled from template literals
//! - `file_scanner`: Source file discovery
//! - `scanner`: Key reference extraction from source text
//! - `merge`: Parsing of translated text for merging
//! - `context`: Lazily loaded state shared by one report invocation

pub mod catalog;
pub mod context;
pub mod file_scanner;
pub mod merge;
pub mod pattern;
pub mod scanner;
pub mod yaml;

pub use catalog::{Catalog, CatalogEntry};
pub use context::ReportContext;
pub use pattern::{DynamicPattern, resolve_dynamic_keys};
pub use scanner::{DynamicReference, KeyReference, KeyScanner, ScanResult};
