use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::diagnostic::MistakeKind;
use crate::error::LintError;

/// The identity of a diagnostic for filtering purposes: the file, the
/// reported position (1-based column, as displayed), and the kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub kind: MistakeKind,
}

impl Tag {
    pub fn new(file: impl Into<String>, line: usize, column: usize, kind: MistakeKind) -> Self {
        Tag {
            file: file.into(),
            line,
            column,
            kind,
        }
    }
}

/// A suppression or inclusion list: tags mapped to their optional
/// free-text notes. One entry per line:
///
/// ```text
/// <file> <line>:<col> <kind> <optional-message>
/// ```
///
/// `#` starts a comment; blank lines are ignored; anything else that does
/// not parse fails fast, naming the offending line.
#[derive(Clone, Debug, Default)]
pub struct FilterList {
    entries: FxHashMap<Tag, String>,
}

impl FilterList {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn insert(&mut self, tag: Tag, message: String) {
        self.entries.insert(tag, message);
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.entries.keys()
    }

    /// Folds another list in; later entries win on duplicate tags.
    pub fn merge(&mut self, other: FilterList) {
        self.entries.extend(other.entries);
    }

    pub fn load(path: &Path) -> Result<Self, LintError> {
        let text = fs::read_to_string(path).map_err(|source| LintError::FilterFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, origin: &Path) -> Result<Self, LintError> {
        let mut list = FilterList::default();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || LintError::FilterEntry {
                path: origin.to_path_buf(),
                line_number: index + 1,
                text: raw.to_string(),
            };
            let mut parts = line.split_whitespace();
            let file = parts.next().ok_or_else(malformed)?;
            let position = parts.next().ok_or_else(malformed)?;
            let kind = parts.next().ok_or_else(malformed)?;
            let message = parts.collect::<Vec<_>>().join(" ");
            let (line_no, column) = position.split_once(':').ok_or_else(malformed)?;
            let line_no: usize = line_no.parse().map_err(|_| malformed())?;
            let column: usize = column.parse().map_err(|_| malformed())?;
            let kind: MistakeKind = kind.parse().map_err(|_| malformed())?;
            list.insert(Tag::new(file, line_no, column, kind), message);
        }
        Ok(list)
    }
}
