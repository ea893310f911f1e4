use anyhow::Result;

use super::super::{args::FormatCommand, exit_status::ExitStatus, report::print_references};
use crate::{core::ReportContext, rules::references::check_references_issues};

pub fn references(cmd: FormatCommand) -> Result<ExitStatus> {
    let ctx = ReportContext::new(&cmd.common)?;
    let references = check_references_issues(&ctx)?;
    print_references(&references, cmd.format)?;
    Ok(ExitStatus::Success)
}
