use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a lint run. Lint diagnostics are not errors;
/// they are the product and never pass through here.
#[derive(Debug, Error)]
pub enum LintError {
    /// The front end could not produce a tree for the input.
    #[error("{}: parse failed: {message}", file.display())]
    Parse { file: PathBuf, message: String },

    #[error("failed to read filter file {}", path.display())]
    FilterFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line_number}: malformed filter entry: {text}", path.display())]
    FilterEntry {
        path: PathBuf,
        line_number: usize,
        text: String,
    },

    /// Invariant violation in the classifier, catalog, or walker. These are
    /// bugs, not user errors; the location names the detecting code.
    #[error("internal error at {location}: {message}")]
    Internal { location: String, message: String },
}

/// Builds a `LintError::Internal` carrying the detecting code location.
#[macro_export]
macro_rules! internal {
    ($($arg:tt)*) => {
        $crate::error::LintError::Internal {
            location: concat!(file!(), ":", line!()).to_string(),
            message: format!($($arg)*),
        }
    };
}
