use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

#[test]
fn test_unused_lists_unreferenced_keys() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test.subcommand("unused").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Found 1 unused keys:\n  tray.quit\n");
    Ok(())
}

#[test]
fn test_unused_json() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test.subcommand("unused").args(["--format", "json"]).output()?;

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(parsed, json!(["tray.quit"]));
    Ok(())
}

#[test]
fn test_missing_keys_in_locale() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test.subcommand("missing").args(["--locale", "de"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_snapshot!(stdout(&output), @r"
    Found 4 missing keys in de:
      containerEngine.options.containerd.label
      containerEngine.options.moby.label
      tray.containerEngine
      tray.quit
    ");
    Ok(())
}

#[test]
fn test_missing_requires_locale() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test.subcommand("missing").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--locale"));
    Ok(())
}

#[test]
fn test_missing_locale_file_is_an_error() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test.subcommand("missing").args(["--locale", "fr"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Failed to read file:"));
    Ok(())
}

#[test]
fn test_stale_keys_in_locale() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test.subcommand("stale").args(["--locale", "de"]).output()?;

    assert_eq!(stdout(&output), "Found 1 stale keys in de:\n  tray.old\n");
    Ok(())
}

#[test]
fn test_stale_none_found() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("translations/de.yaml", "tray:\n  quit: Beenden\n")?;
    let output = test.subcommand("stale").args(["--locale", "de"]).output()?;

    assert_eq!(stdout(&output), "No stale keys in de found.\n");
    Ok(())
}

#[test]
fn test_references_text() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test.subcommand("references").output()?;

    assert_eq!(
        stdout(&output),
        "tray.containerEngine:\n  src/components/Tray.vue:2\ntray.preferences:\n  background.ts:1\n"
    );
    Ok(())
}

#[test]
fn test_references_json() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test
        .subcommand("references")
        .args(["--format", "json"])
        .output()?;

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        parsed,
        json!({
            "tray.containerEngine": [{ "file": "src/components/Tray.vue", "line": 2 }],
            "tray.preferences": [{ "file": "background.ts", "line": 1 }],
        })
    );
    Ok(())
}

#[test]
fn test_dynamic_text() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test.subcommand("dynamic").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Found 1 dynamic key patterns:\n\n\
         \x20 containerEngine.options.{}.label\n\
         \x20   source:  src/components/Tray.vue:3\n\
         \x20   matches: 2 keys\n\
         \x20     containerEngine.options.containerd.label\n\
         \x20     containerEngine.options.moby.label\n\n"
    );
    Ok(())
}

#[test]
fn test_dynamic_json() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test.subcommand("dynamic").args(["--format", "json"]).output()?;

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        parsed,
        json!([{
            "pattern": "containerEngine.options.{}.label",
            "source": "src/components/Tray.vue:3",
            "matches": [
                "containerEngine.options.containerd.label",
                "containerEngine.options.moby.label",
            ],
        }])
    );
    Ok(())
}

#[test]
fn test_dynamic_none_found() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("src/components/Tray.vue", "<p>{{ t('tray.quit') }}</p>\n")?;
    let output = test.subcommand("dynamic").output()?;

    assert_eq!(stdout(&output), "No dynamic key patterns found.\n");
    Ok(())
}

#[test]
fn test_reference_locale_override() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test
        .subcommand("stale")
        .args(["--locale", "en-us", "--reference-locale", "de"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Found 4 stale keys in en-us:\n  \
         containerEngine.options.containerd.label\n  \
         containerEngine.options.moby.label\n  \
         tray.containerEngine\n  \
         tray.quit\n"
    );
    Ok(())
}
