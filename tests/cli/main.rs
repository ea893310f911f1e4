use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod init;
mod merge;
mod remove;
mod reports;
mod translate;

const BIN_NAME: &str = "i18n-report";

const CONFIG: &str = r#"{
  "translationsDir": "translations",
  "sourceDir": "src",
  "extraSources": ["background.ts"]
}"#;

const REFERENCE_CATALOG: &str = "\
tray:
  containerEngine: 'Container engine: {name}'
  preferences: Preferences
  quit: Quit

containerEngine:
  options:
    moby:
      label: dockerd (moby)
    containerd:
      label: containerd
";

const GERMAN_CATALOG: &str = "\
tray:
  # kept
  preferences: Einstellungen
  old: Alt
";

const TRAY_VUE: &str = r#"<template>
  <button>{{ t('tray.containerEngine', { name }) }}</button>
  <option :label="t(`containerEngine.options.${engine}.label`)" />
</template>
"#;

const BACKGROUND_TS: &str = "menu.append({ label: t('tray.preferences') });\n";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A small repository: reference catalog, a German catalog, one Vue
    /// component and a root-level script.
    pub fn with_project() -> Result<Self> {
        let test = Self::new()?;
        test.write_file("package.json", "{}")?;
        test.write_file(".i18n-report.json", CONFIG)?;
        test.write_file("translations/en-us.yaml", REFERENCE_CATALOG)?;
        test.write_file("translations/de.yaml", GERMAN_CATALOG)?;
        test.write_file("src/components/Tray.vue", TRAY_VUE)?;
        test.write_file("background.ts", BACKGROUND_TS)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn subcommand(&self, name: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg(name);
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Run `cmd` with `input` on standard input.
pub fn run_with_stdin(cmd: &mut Command, input: &str) -> Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .context("stdin not captured")?
        .write_all(input.as_bytes())?;
    Ok(child.wait_with_output()?)
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.command().output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));
    Ok(())
}
