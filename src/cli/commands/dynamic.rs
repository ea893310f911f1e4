use anyhow::Result;

use super::super::{args::FormatCommand, exit_status::ExitStatus, report::print_dynamic};
use crate::{core::ReportContext, rules::dynamic::check_dynamic_issues};

pub fn dynamic(cmd: FormatCommand) -> Result<ExitStatus> {
    let ctx = ReportContext::new(&cmd.common)?;
    let patterns = check_dynamic_issues(&ctx)?;
    print_dynamic(&patterns, cmd.format)?;
    Ok(ExitStatus::Success)
}
