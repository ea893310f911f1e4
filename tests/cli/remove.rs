use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, REFERENCE_CATALOG, run_with_stdin, stderr};

#[test]
fn test_remove_keys_from_stdin() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = run_with_stdin(
        &mut test.subcommand("remove"),
        "Found 2 unused keys:\n  tray.quit\n  tray.old\n",
    )?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let messages = stderr(&output);
    assert!(messages.contains("Removed 1 keys from translations/de.yaml"));
    assert!(messages.contains("Removed 1 keys from translations/en-us.yaml"));

    assert_eq!(
        test.read_file("translations/de.yaml")?,
        "tray:\n  # kept\n  preferences: Einstellungen\n"
    );
    assert!(!test.read_file("translations/en-us.yaml")?.contains("quit"));
    Ok(())
}

#[test]
fn test_remove_without_valid_keys_is_an_error() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = run_with_stdin(&mut test.subcommand("remove"), "single\n\n")?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "Error: no valid keys provided on stdin\n");
    Ok(())
}

#[test]
fn test_remove_stale_skips_reference_catalog() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = test.subcommand("remove").arg("--stale").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Removed 1 stale keys from translations/de.yaml"));
    assert_eq!(
        test.read_file("translations/de.yaml")?,
        "tray:\n  # kept\n  preferences: Einstellungen\n"
    );
    assert_eq!(test.read_file("translations/en-us.yaml")?, REFERENCE_CATALOG);
    Ok(())
}

#[test]
fn test_remove_unknown_key_leaves_files_untouched() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = run_with_stdin(&mut test.subcommand("remove"), "does.not.exist\n")?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!stderr(&output).contains("Removed"));
    assert_eq!(test.read_file("translations/en-us.yaml")?, REFERENCE_CATALOG);
    Ok(())
}
