use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::location::Location;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MistakeKind {
    Indent,
    Sequence,
}

impl fmt::Display for MistakeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MistakeKind::Indent => f.write_str("indent"),
            MistakeKind::Sequence => f.write_str("sequence"),
        }
    }
}

impl FromStr for MistakeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "indent" => Ok(MistakeKind::Indent),
            "sequence" => Ok(MistakeKind::Sequence),
            other => Err(format!("unknown mistake kind {other:?}")),
        }
    }
}

/// One whitespace mistake found by a shape checker. Immutable once
/// produced; the reporter decides whether it survives filtering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Mistake {
    pub kind: MistakeKind,
    pub description: String,
    pub loc: Location,
    pub child_index: Option<usize>,
    pub expected_line: Option<usize>,
    pub expected_column: Option<usize>,
    pub backdent_column: Option<usize>,
}

impl Mistake {
    pub fn new(kind: MistakeKind, description: impl Into<String>, loc: Location) -> Self {
        Mistake {
            kind,
            description: description.into(),
            loc,
            child_index: None,
            expected_line: None,
            expected_column: None,
            backdent_column: None,
        }
    }

    pub fn child(mut self, index: usize) -> Self {
        self.child_index = Some(index);
        self
    }

    pub fn expected_line(mut self, line: usize) -> Self {
        self.expected_line = Some(line);
        self
    }

    pub fn expected_column(mut self, column: usize) -> Self {
        self.expected_column = Some(column);
        self
    }

    pub fn backdent(mut self, column: usize) -> Self {
        self.backdent_column = Some(column);
        self
    }
}

/// The object that is eventually reported and printed in the console.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: PathBuf,
    pub loc: Location,
    pub kind: MistakeKind,
    /// The nearest enclosing brick name, so users see the construct they
    /// wrote rather than a glue production.
    pub name: String,
    pub description: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.file.display(),
            self.loc,
            self.kind,
            self.name,
            self.description
        )
    }
}
