use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_check_fails_with_issues() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test.subcommand("check").args(["--locale", "de"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "  unused keys:                     1  FAIL\n\
         \x20 stale keys in de:                1  FAIL\n\
         \x20 used keys missing from de:       3  FAIL\n"
    );
    assert!(stderr(&output).contains("checks failed"));
    Ok(())
}

#[test]
fn test_check_passes_on_clean_project() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "translations/en-us.yaml",
        "tray:\n  containerEngine: 'Container engine: {name}'\n  preferences: Preferences\n",
    )?;
    test.write_file(
        "translations/de.yaml",
        "tray:\n  containerEngine: 'Container-Engine: {name}'\n  preferences: Einstellungen\n",
    )?;

    let output = test.subcommand("check").args(["--locale", "de"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with("All checks passed.\n"));
    Ok(())
}
