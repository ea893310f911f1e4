use anyhow::Result;

use super::super::{args::TranslateCommand, exit_status::ExitStatus, report::print_translate};
use crate::{
    core::ReportContext,
    rules::translate::{Batch, check_translate_issues},
};

pub fn translate(cmd: TranslateCommand) -> Result<ExitStatus> {
    let batch = if cmd.batches > 0 {
        Some(Batch::new(cmd.batch, cmd.batches)?)
    } else {
        None
    };

    let ctx = ReportContext::new(&cmd.common)?;
    let mut entries = check_translate_issues(&ctx, &cmd.locale, batch)?;
    if !cmd.comments {
        for entry in &mut entries {
            entry.comment = None;
        }
    }

    print_translate(&entries, &cmd.locale, batch, cmd.format)?;
    Ok(ExitStatus::Success)
}
