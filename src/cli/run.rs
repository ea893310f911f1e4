use anyhow::Result;

use super::{
    args::Command,
    commands::{
        check::check, dynamic::dynamic, init::init, merge::merge, references::references,
        remove::remove, reports::missing, reports::stale, reports::unused, translate::translate,
    },
    exit_status::ExitStatus,
};

/// Dispatch to the handler of the parsed command.
///
/// # Returns
/// - `Ok(ExitStatus)` describing how the command finished
/// - `Err` if the command fails (e.g., repository root not found, parse errors)
pub fn run(command: Command) -> Result<ExitStatus> {
    match command {
        Command::Unused(cmd) => unused(cmd),
        Command::Missing(cmd) => missing(cmd),
        Command::Stale(cmd) => stale(cmd),
        Command::Translate(cmd) => translate(cmd),
        Command::Merge(cmd) => merge(cmd),
        Command::Remove(cmd) => remove(cmd),
        Command::References(cmd) => references(cmd),
        Command::Dynamic(cmd) => dynamic(cmd),
        Command::Check(cmd) => check(cmd),
        Command::Init(cmd) => init(cmd),
    }
}
