use anyhow::Result;
use i18n_report::core::Catalog;
use pretty_assertions::assert_eq;

use crate::{CliTest, run_with_stdin, stderr};

#[test]
fn test_merge_from_stdin_keeps_existing_entries() -> Result<()> {
    let test = CliTest::with_project()?;
    let input = "\
tray.quit=Beenden
# @reason formal register
tray.containerEngine: 'Container-Engine: {name}'
";
    let output = run_with_stdin(test.subcommand("merge").args(["--locale", "de"]), input)?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(
        stderr(&output).contains("Merged 2 new keys into translations/de.yaml (total: 4 keys)")
    );

    let catalog = Catalog::load(&test.root().join("translations/de.yaml"))?;
    let summary: Vec<(&str, &str, Option<&str>)> = catalog
        .entries()
        .map(|e| (e.key.as_str(), e.value.as_str(), e.comment.as_deref()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                "tray.containerEngine",
                "Container-Engine: {name}",
                Some("# @reason formal register")
            ),
            ("tray.old", "Alt", None),
            ("tray.preferences", "Einstellungen", Some("# kept")),
            ("tray.quit", "Beenden", None),
        ]
    );
    Ok(())
}

#[test]
fn test_merge_writes_sorted_nested_yaml() -> Result<()> {
    let test = CliTest::with_project()?;
    let input = "containerEngine.options.moby.label=dockerd (moby)\ntray.quit=Beenden\n";
    let output = run_with_stdin(test.subcommand("merge").args(["--locale", "fr"]), input)?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("translations/fr.yaml")?,
        "containerEngine:\n  options:\n    moby:\n      label: dockerd (moby)\n\ntray:\n  quit: Beenden\n"
    );
    Ok(())
}

#[test]
fn test_merge_nested_key_replaces_existing_leaf() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = run_with_stdin(
        test.subcommand("merge").args(["--locale", "de"]),
        "tray.old.short=Kurz\n",
    )?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let messages = stderr(&output);
    assert!(messages.contains("merged key replaces a conflicting key"));
    assert!(messages.contains("Merged 1 new keys into translations/de.yaml (total: 2 keys)"));
    assert_eq!(
        test.read_file("translations/de.yaml")?,
        "tray:\n  old:\n    short: Kurz\n  # kept\n  preferences: Einstellungen\n"
    );
    Ok(())
}

#[test]
fn test_merge_from_markdown_file() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "agent-output.md",
        "Here are the translations:\n\n```yaml\ntray.quit=Beenden\n```\n",
    )?;

    let output = test
        .subcommand("merge")
        .args(["--locale", "de", "agent-output.md"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let catalog = Catalog::load(&test.root().join("translations/de.yaml"))?;
    assert_eq!(
        catalog.get("tray.quit").map(|e| e.value.as_str()),
        Some("Beenden")
    );
    assert_eq!(catalog.len(), 3);
    Ok(())
}

#[test]
fn test_merge_without_entries_is_an_error() -> Result<()> {
    let test = CliTest::with_project()?;
    let output = run_with_stdin(
        test.subcommand("merge").args(["--locale", "de"]),
        "nothing to see here\n",
    )?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "Error: no translation entries found in input\n");
    assert_eq!(
        test.read_file("translations/de.yaml")?,
        "tray:\n  # kept\n  preferences: Einstellungen\n  old: Alt\n"
    );
    Ok(())
}
