use std::process::ExitCode;

/// How an `i18n-report` invocation ended.
///
/// Reports (`unused`, `missing`, `translate`, ...) always exit 0 once they
/// have printed, whatever they list; only `check` turns findings into a
/// non-zero status, so it can gate CI. `init` also exits 1 when it refuses
/// to overwrite an existing config file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// 0: the report was printed, the files were rewritten, or every check passed.
    Success,
    /// 1: `check` counted unused, stale or untranslated keys, or `init` found
    /// a config file already in place.
    Failure,
    /// 2: the command could not run (bad arguments, unreadable or malformed
    /// locale files, invalid config, no repository root).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
