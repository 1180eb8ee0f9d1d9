use serde::{Deserialize, Serialize};

/// Sourcecode location. Lines are 1-based; columns are 0-based internally
/// and 1-based when displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }

    /// Current line
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current column, 0-based
    pub fn column(&self) -> usize {
        self.column
    }

    /// Column as shown to the user, 1-based
    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.display_column())
    }
}
