//! i18n-report - translation catalog maintenance for Vue/TypeScript projects
//!
//! i18n-report is a CLI tool and library that keeps a YAML translation
//! catalog in sync with the application sources. It finds unused, missing
//! and stale keys, builds translation work lists, merges translated text
//! back into locale files while keeping comments, and removes keys.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, output)
//! - `config`: Configuration file loading and validation
//! - `core`: Catalog model, YAML engine and source scanner
//! - `rules`: Report generators over a catalog and a source scan
//! - `utils`: Shared utility functions
//! - `yaml_editor`: In-place key removal for locale files

pub mod cli;
pub mod config;
pub mod core;
pub mod rules;
pub mod utils;
pub mod yaml_editor;
