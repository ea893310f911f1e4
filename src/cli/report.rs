//! Report formatting and printing utilities.
//!
//! Every report has a text form for people and a pretty-printed JSON form
//! for scripts. Printers write to any `Write` so they can be tested without
//! capturing stdout. Separate from the rules so the crate can be used as a
//! library.

use std::{
    collections::BTreeMap,
    io::{self, Write},
};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::args::OutputFormat;
use crate::{
    core::{CatalogEntry, KeyReference},
    rules::{check::CheckOutcome, dynamic::DynamicPatternReport, translate::Batch},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Width of the label column in `check` output.
const CHECK_LABEL_WIDTH: usize = 30;

fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Print a list of keys as `Found N <label>:` plus one indented line each.
pub fn print_strings(items: &[String], format: OutputFormat, label: &str) -> Result<()> {
    print_strings_to(&mut io::stdout().lock(), items, format, label)
}

pub fn print_strings_to<W: Write>(
    writer: &mut W,
    items: &[String],
    format: OutputFormat,
    label: &str,
) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(writer, items);
    }
    if items.is_empty() {
        writeln!(writer, "No {} found.", label)?;
        return Ok(());
    }
    writeln!(writer, "Found {} {}:", items.len(), label)?;
    for item in items {
        writeln!(writer, "  {}", item)?;
    }
    Ok(())
}

/// Print a translation work list as `key=value` lines.
pub fn print_translate(
    entries: &[CatalogEntry],
    locale: &str,
    batch: Option<Batch>,
    format: OutputFormat,
) -> Result<()> {
    print_translate_to(&mut io::stdout().lock(), entries, locale, batch, format)
}

pub fn print_translate_to<W: Write>(
    writer: &mut W,
    entries: &[CatalogEntry],
    locale: &str,
    batch: Option<Batch>,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(writer, entries);
    }
    if entries.is_empty() {
        writeln!(writer, "No used keys missing from {}.", locale)?;
        return Ok(());
    }

    let mut label = format!("Found {} used keys missing from {}", entries.len(), locale);
    if let Some(batch) = batch {
        label.push_str(&format!(" (batch {} of {})", batch.index, batch.count));
    }
    writeln!(writer, "{}:\n", label)?;
    for entry in entries {
        if let Some(comment) = &entry.comment {
            writeln!(writer, "{}", comment)?;
        }
        writeln!(writer, "{}={}", entry.key, entry.value)?;
    }
    Ok(())
}

pub fn print_references(
    references: &BTreeMap<String, Vec<KeyReference>>,
    format: OutputFormat,
) -> Result<()> {
    print_references_to(&mut io::stdout().lock(), references, format)
}

pub fn print_references_to<W: Write>(
    writer: &mut W,
    references: &BTreeMap<String, Vec<KeyReference>>,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(writer, references);
    }
    for (key, locations) in references {
        writeln!(writer, "{}:", key)?;
        for location in locations {
            writeln!(writer, "  {}", location)?;
        }
    }
    Ok(())
}

pub fn print_dynamic(patterns: &[DynamicPatternReport], format: OutputFormat) -> Result<()> {
    print_dynamic_to(&mut io::stdout().lock(), patterns, format)
}

pub fn print_dynamic_to<W: Write>(
    writer: &mut W,
    patterns: &[DynamicPatternReport],
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(writer, patterns);
    }
    if patterns.is_empty() {
        writeln!(writer, "No dynamic key patterns found.")?;
        return Ok(());
    }

    writeln!(writer, "Found {} dynamic key patterns:\n", patterns.len())?;
    for report in patterns {
        writeln!(writer, "  {}", report.pattern)?;
        writeln!(writer, "    source:  {}", report.source)?;
        writeln!(writer, "    matches: {} keys", report.matches.len())?;
        for key in &report.matches {
            writeln!(writer, "      {}", key)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Print one line per check category. Returns whether every check passed.
pub fn print_check(outcomes: &[CheckOutcome]) -> Result<bool> {
    print_check_to(&mut io::stdout().lock(), outcomes)
}

pub fn print_check_to<W: Write>(writer: &mut W, outcomes: &[CheckOutcome]) -> Result<bool> {
    for outcome in outcomes {
        let label = format!("{}:", outcome.label);
        let padding = CHECK_LABEL_WIDTH.saturating_sub(label.width());
        let status = if outcome.passed() {
            "OK".green()
        } else {
            "FAIL".red()
        };
        writeln!(
            writer,
            "  {}{} {:>3}  {}",
            label,
            " ".repeat(padding),
            outcome.count,
            status
        )?;
    }

    let passed = outcomes.iter().all(CheckOutcome::passed);
    if passed {
        writeln!(writer, "All checks passed.")?;
    }
    Ok(passed)
}

/// Print a status line to stderr, e.g. after a file was rewritten.
pub fn print_status(message: &str) {
    eprintln!("{} {}", SUCCESS_MARK.green(), message);
}

/// Print a failure line to stderr.
pub fn print_failure(message: &str) {
    eprintln!("{} {}", FAILURE_MARK.red(), message.red());
}
