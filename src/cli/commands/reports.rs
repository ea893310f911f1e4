//! Plain key-list reports: `unused`, `missing` and `stale`.

use anyhow::Result;

use super::super::{
    args::{LocaleReportCommand, UnusedCommand},
    exit_status::ExitStatus,
    report::print_strings,
};
use crate::{
    core::ReportContext,
    rules::{
        missing::check_missing_keys_issues, stale::check_stale_keys_issues,
        unused::check_unused_keys_issues,
    },
};

pub fn unused(cmd: UnusedCommand) -> Result<ExitStatus> {
    let ctx = ReportContext::new(&cmd.common)?;
    let keys = check_unused_keys_issues(&ctx)?;
    print_strings(&keys, cmd.format, "unused keys")?;
    Ok(ExitStatus::Success)
}

pub fn missing(cmd: LocaleReportCommand) -> Result<ExitStatus> {
    let ctx = ReportContext::new(&cmd.common)?;
    let keys = check_missing_keys_issues(&ctx, &cmd.locale)?;
    print_strings(&keys, cmd.format, &format!("missing keys in {}", cmd.locale))?;
    Ok(ExitStatus::Success)
}

pub fn stale(cmd: LocaleReportCommand) -> Result<ExitStatus> {
    let ctx = ReportContext::new(&cmd.common)?;
    let keys = check_stale_keys_issues(&ctx, &cmd.locale)?;
    print_strings(&keys, cmd.format, &format!("stale keys in {}", cmd.locale))?;
    Ok(ExitStatus::Success)
}
