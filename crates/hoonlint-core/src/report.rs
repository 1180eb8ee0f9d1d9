use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use rustc_hash::FxHashSet;

use crate::classify::Shape;
use crate::diagnostic::{Diagnostic, Mistake};
use crate::filter::{FilterList, Tag};
use crate::location::Location;

/// One line of `--census-whitespace` output: a construct and its inferred
/// shape.
#[derive(Clone, Debug)]
pub struct CensusNote {
    pub loc: Location,
    pub name: String,
    pub shape: Shape,
}

/// Per-run accumulator: applies the inclusion and suppression filters to
/// each mistake, keeps the survivors keyed by line for the windowed
/// renderer, and tracks which suppressions were never needed.
#[derive(Debug)]
pub struct Reporter {
    file: PathBuf,
    file_name: String,
    inclusions: Option<FilterList>,
    suppressions: FilterList,
    census: bool,
    used: FxHashSet<Tag>,
    diagnostics: Vec<Diagnostic>,
    census_notes: Vec<CensusNote>,
    topic_lines: BTreeSet<usize>,
    mistake_lines: BTreeMap<usize, Vec<String>>,
}

impl Reporter {
    pub fn new(
        file: impl Into<PathBuf>,
        inclusions: Option<FilterList>,
        suppressions: FilterList,
        census: bool,
    ) -> Self {
        let file = file.into();
        let file_name = file.display().to_string();
        Reporter {
            file,
            file_name,
            inclusions,
            suppressions,
            census,
            used: FxHashSet::default(),
            diagnostics: Vec::new(),
            census_notes: Vec::new(),
            topic_lines: BTreeSet::new(),
            mistake_lines: BTreeMap::new(),
        }
    }

    pub fn census_enabled(&self) -> bool {
        self.census
    }

    /// Files a mistake found at a construct on `parent_line`, subject to
    /// the filters.
    pub fn report(&mut self, hoon_name: &str, mistake: Mistake, parent_line: usize) {
        let tag = Tag::new(
            self.file_name.clone(),
            mistake.loc.line(),
            mistake.loc.display_column(),
            mistake.kind,
        );
        if let Some(inclusions) = &self.inclusions {
            if !inclusions.contains(&tag) {
                return;
            }
        }
        if self.suppressions.contains(&tag) {
            self.used.insert(tag);
            if !self.census {
                return;
            }
            let description = format!("SUPPRESSION {}", mistake.description);
            self.record(hoon_name, mistake, description, parent_line);
            return;
        }
        let description = mistake.description.clone();
        self.record(hoon_name, mistake, description, parent_line);
    }

    fn record(
        &mut self,
        hoon_name: &str,
        mistake: Mistake,
        description: String,
        parent_line: usize,
    ) {
        self.mistake_lines
            .entry(mistake.loc.line())
            .or_default()
            .push(description.clone());
        self.topic_lines.insert(parent_line);
        self.topic_lines.insert(mistake.loc.line());
        self.diagnostics.push(Diagnostic {
            file: self.file.clone(),
            loc: mistake.loc,
            kind: mistake.kind,
            name: hoon_name.to_string(),
            description,
        });
    }

    pub fn census_note(&mut self, name: &str, shape: Shape, loc: Location) {
        self.census_notes.push(CensusNote {
            loc,
            name: name.to_string(),
            shape,
        });
    }

    /// Sorts the diagnostics so output order is stable.
    pub fn finish(&mut self) {
        self.diagnostics.sort();
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn census_notes(&self) -> &[CensusNote] {
        &self.census_notes
    }

    pub fn topic_lines(&self) -> &BTreeSet<usize> {
        &self.topic_lines
    }

    pub fn mistake_lines(&self) -> &BTreeMap<usize, Vec<String>> {
        &self.mistake_lines
    }

    /// Suppression entries that never matched a diagnostic, in position
    /// order.
    pub fn unused_suppressions(&self) -> Vec<&Tag> {
        let mut unused: Vec<&Tag> = self
            .suppressions
            .tags()
            .filter(|tag| !self.used.contains(tag))
            .collect();
        unused.sort();
        unused
    }
}
