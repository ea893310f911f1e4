use anyhow::Result;

use super::super::{
    args::CheckCommand,
    exit_status::ExitStatus,
    report::{print_check, print_failure},
};
use crate::{core::ReportContext, rules::check::check_all_issues};

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let ctx = ReportContext::new(&cmd.common)?;
    let outcomes = check_all_issues(&ctx, &cmd.locale)?;

    if print_check(&outcomes)? {
        Ok(ExitStatus::Success)
    } else {
        print_failure("checks failed");
        Ok(ExitStatus::Failure)
    }
}
