use std::process::ExitCode;

/// Process exit status, following the usual linter convention.
///
/// - `Success` (0): nothing to report
/// - `Failure` (1): the run completed and found work to do
/// - `Error` (2): the run could not complete (bad config, corrupt dictionary)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Missing translations were found, or a dry run has pending changes.
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
