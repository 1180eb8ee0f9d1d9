use std::process::ExitCode;

/// Exit disposition: zero once all diagnostics were printed, nonzero only
/// for user or internal errors. Finding mistakes is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::Error => ExitCode::from(1),
        }
    }
}
