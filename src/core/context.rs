use std::{
    cell::OnceCell,
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use tracing::{debug, warn};

use crate::{
    cli::args::CommonArgs,
    config::{Config, find_repo_root, load_config},
    core::{
        catalog::Catalog,
        file_scanner::scan_source_files,
        scanner::{KeyScanner, ScanResult, scan_references},
    },
    utils::relative_display,
};

/// Shared state for one report invocation.
///
/// Holds the repository root and the merged configuration. The reference
/// catalog and the source scan are computed on first access, so commands
/// such as `stale` never walk the source tree.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--reference-locale en`)
/// 2. `.i18n-report.json` at the repository root
/// 3. Built-in defaults
pub struct ReportContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Repository root; every relative path is resolved against it.
    pub root_dir: PathBuf,

    /// Reference locale catalog, loaded by `reference_catalog()`.
    reference: OnceCell<Catalog>,

    /// Source scan, computed by `scan()`.
    scan: OnceCell<ScanResult>,
}

impl ReportContext {
    /// Create a context from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The start directory does not exist
    /// - No repository root is found above it
    /// - The config file is invalid
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let start_dir = match &common_args.root {
            Some(root) => root.clone(),
            None => env::current_dir().context("Failed to read current directory")?,
        };
        let start_dir = start_dir
            .canonicalize()
            .with_context(|| format!("Invalid root directory: {}", start_dir.display()))?;

        let root_dir = find_repo_root(&start_dir)?;
        let config_result = load_config(&root_dir)?;
        if !config_result.from_file {
            debug!("no config file found in {}, using defaults", root_dir.display());
        }

        let mut config = config_result.config;
        if let Some(ref translations_dir) = common_args.translations_dir {
            config.translations_dir = translations_dir.clone();
        }
        if let Some(ref reference_locale) = common_args.reference_locale {
            config.reference_locale = reference_locale.clone();
        }
        config.validate()?;

        debug!(root = %root_dir.display(), "resolved repository root");
        Ok(Self::with_config(root_dir, config))
    }

    /// Create a context for a known root and configuration.
    pub fn with_config(root_dir: PathBuf, config: Config) -> Self {
        Self {
            config,
            root_dir,
            reference: OnceCell::new(),
            scan: OnceCell::new(),
        }
    }

    /// Path of `<locale>.yaml` in the translations directory.
    pub fn locale_path(&self, locale: &str) -> PathBuf {
        self.config.locale_path(&self.root_dir, locale)
    }

    pub fn reference_path(&self) -> PathBuf {
        self.locale_path(&self.config.reference_locale)
    }

    /// Path relative to the repository root, for display.
    pub fn relative(&self, path: &Path) -> String {
        relative_display(&self.root_dir, path)
    }

    /// The reference locale catalog (lazy).
    pub fn reference_catalog(&self) -> Result<&Catalog> {
        if let Some(catalog) = self.reference.get() {
            return Ok(catalog);
        }
        let catalog = Catalog::load(&self.reference_path())?;
        debug!(keys = catalog.len(), "loaded reference catalog");
        Ok(self.reference.get_or_init(|| catalog))
    }

    /// Load the catalog of `locale`.
    pub fn load_locale(&self, locale: &str) -> Result<Catalog> {
        Catalog::load(&self.locale_path(locale))
    }

    /// Scan the source tree for key references (lazy).
    pub fn scan(&self) -> Result<&ScanResult> {
        if let Some(scan) = self.scan.get() {
            return Ok(scan);
        }

        let catalog = self.reference_catalog()?;
        let sources = scan_source_files(&self.root_dir, &self.config)?;
        if sources.skipped_count > 0 {
            warn!(
                "{} path(s) skipped due to access errors",
                sources.skipped_count
            );
        }

        let scanner = KeyScanner::new(&self.config.key_properties)?;
        let result = scan_references(&self.root_dir, &sources.files, &scanner, catalog);
        Ok(self.scan.get_or_init(|| result))
    }

    /// All `*.yaml` files directly in the translations directory, sorted.
    pub fn translation_files(&self) -> Result<Vec<PathBuf>> {
        let dir = self.root_dir.join(&self.config.translations_dir);
        let entries = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to read directory: {}", dir.display()))?
                .path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Whether `path` is the reference locale file.
    pub fn is_reference_file(&self, path: &Path) -> bool {
        path.file_name() == self.reference_path().file_name()
    }
}
