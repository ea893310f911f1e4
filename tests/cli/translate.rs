use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

#[test]
fn test_translate_lists_used_missing_keys() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test.subcommand("translate").args(["--locale", "de"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Found 3 used keys missing from de:\n\n\
         containerEngine.options.containerd.label=containerd\n\
         containerEngine.options.moby.label=dockerd (moby)\n\
         tray.containerEngine=Container engine: {name}\n"
    );
    Ok(())
}

#[test]
fn test_translate_batch() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test
        .subcommand("translate")
        .args(["--locale", "de", "--batch", "2", "--batches", "2"])
        .output()?;

    assert_eq!(
        stdout(&output),
        "Found 1 used keys missing from de (batch 2 of 2):\n\n\
         tray.containerEngine=Container engine: {name}\n"
    );
    Ok(())
}

#[test]
fn test_translate_batch_out_of_range() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test
        .subcommand("translate")
        .args(["--locale", "de", "--batch", "3", "--batches", "2"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "Error: --batch must be between 1 and 2\n");
    Ok(())
}

#[test]
fn test_translate_json_with_comments() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "translations/en-us.yaml",
        "tray:\n  # @reason {name} is the engine name\n  containerEngine: 'Container engine: {name}'\n  preferences: Preferences\n",
    )?;

    let output = test
        .subcommand("translate")
        .args(["--locale", "de", "--format", "json", "--comments"])
        .output()?;

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        parsed,
        json!([{
            "key": "tray.containerEngine",
            "value": "Container engine: {name}",
            "comment": "# @reason {name} is the engine name",
        }])
    );
    Ok(())
}

#[test]
fn test_translate_json_omits_comments_by_default() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "translations/en-us.yaml",
        "tray:\n  # @reason dropped\n  containerEngine: Engine\n",
    )?;

    let output = test
        .subcommand("translate")
        .args(["--locale", "de", "--format", "json"])
        .output()?;

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        parsed,
        json!([{ "key": "tray.containerEngine", "value": "Engine" }])
    );
    Ok(())
}

#[test]
fn test_translate_nothing_missing() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("translations/de.yaml", REFERENCE_COPY)?;
    let output = test.subcommand("translate").args(["--locale", "de"]).output()?;

    assert_eq!(stdout(&output), "No used keys missing from de.\n");
    Ok(())
}

const REFERENCE_COPY: &str = "\
tray:
  containerEngine: Engine
  preferences: Einstellungen
containerEngine:
  options:
    moby:
      label: moby
    containerd:
      label: containerd
";
