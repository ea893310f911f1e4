use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".i18n-report.json";

/// File whose presence marks a repository root when no config file exists.
pub const REPO_MARKER: &str = "package.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_translations_dir")]
    pub translations_dir: String,
    #[serde(default = "default_reference_locale")]
    pub reference_locale: String,
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    #[serde(default = "default_extra_sources")]
    pub extra_sources: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,
    #[serde(default = "default_key_properties")]
    pub key_properties: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_translations_dir() -> String {
    "pkg/rancher-desktop/assets/translations".to_string()
}

fn default_reference_locale() -> String {
    "en-us".to_string()
}

fn default_source_dir() -> String {
    "pkg/rancher-desktop".to_string()
}

fn default_extra_sources() -> Vec<String> {
    vec!["background.ts".to_string()]
}

fn default_extensions() -> Vec<String> {
    ["vue", "ts", "js"].map(String::from).to_vec()
}

fn default_excluded_dirs() -> Vec<String> {
    ["node_modules", ".git", "dist", "vendor", "__tests__"]
        .map(String::from)
        .to_vec()
}

fn default_key_properties() -> Vec<String> {
    ["titleKey", "descriptionKey", "labelKey"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translations_dir: default_translations_dir(),
            reference_locale: default_reference_locale(),
            source_dir: default_source_dir(),
            extra_sources: default_extra_sources(),
            extensions: default_extensions(),
            excluded_dirs: default_excluded_dirs(),
            key_properties: default_key_properties(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.reference_locale.trim().is_empty() {
            bail!("'referenceLocale' must not be empty");
        }
        if self.extensions.is_empty() {
            bail!("'extensions' must list at least one file extension");
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for property in &self.key_properties {
            let valid = !property.is_empty()
                && property
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
            if !valid {
                bail!("Invalid property name in 'keyProperties': \"{}\"", property);
            }
        }

        Ok(())
    }

    /// Path of `<locale>.yaml` in the translations directory.
    pub fn locale_path(&self, root: &Path, locale: &str) -> PathBuf {
        root.join(&self.translations_dir)
            .join(format!("{}.yaml", locale))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Walk up from `start_dir` to the first directory holding the config file
/// or a `package.json`.
pub fn find_repo_root(start_dir: &Path) -> Result<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        if current.join(CONFIG_FILE_NAME).is_file() || current.join(REPO_MARKER).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            bail!(
                "could not find repository root (no {} or {} found above {})",
                CONFIG_FILE_NAME,
                REPO_MARKER,
                start_dir.display()
            );
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

/// Load the config file at the repository root, or defaults when absent.
pub fn load_config(root: &Path) -> Result<ConfigLoadResult> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        });
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(ConfigLoadResult {
        config,
        from_file: true,
    })
}
