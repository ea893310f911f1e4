use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.subcommand("init").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Created .i18n-report.json"));

    let content = test.read_file(".i18n-report.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["referenceLocale"], "en-us");
    assert_eq!(
        parsed["translationsDir"],
        "pkg/rancher-desktop/assets/translations"
    );
    assert!(parsed.get("keyProperties").is_some());
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".i18n-report.json", "{}")?;

    let output = test.subcommand("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".i18n-report.json already exists"));
    assert!(stdout(&output).is_empty());
    assert_eq!(test.read_file(".i18n-report.json")?, "{}");
    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.subcommand("init").output()?;

    test.write_file(
        "pkg/rancher-desktop/assets/translations/en-us.yaml",
        "tray:\n  quit: Quit\n",
    )?;
    test.write_file(
        "pkg/rancher-desktop/components/Tray.vue",
        "<p>{{ t('tray.quit') }}</p>\n",
    )?;

    let output = test.subcommand("unused").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "No unused keys found.\n");
    Ok(())
}
