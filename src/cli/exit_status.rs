use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): run completed, nothing to report
/// - `Failure` (1): run completed but reported issues, or found nothing to process
/// - `Error` (2): run aborted (config error, unreadable input, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
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
