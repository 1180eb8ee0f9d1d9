use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

/// The whitespace shape of a rule. Disjoint: a rule belongs to exactly one
/// shape, resolved once at catalog construction so runtime dispatch is a
/// single lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Descending staircase, the default for tall rules.
    Backdented,
    /// A tall rune that also anchors body indentation for its subtree.
    TallBody,
    /// A cast ("note"): the staircase re-anchors at the note indent.
    TallNote,
    /// Cell-constructor arm: children on later lines sit one stop in.
    TallLusLus,
    /// A single jog inside a jogging.
    TallJog,
    /// Jogging hoon with no siblings before the jogging.
    Jogging0,
    /// Jogging hoon with a head before the jogging.
    Jogging1,
    /// Jogging hoon with a head and a subhead before the jogging.
    Jogging2,
    /// Jogging first, tail after the terminator.
    PrefixJogging,
    /// Gap-separated sequence.
    Sequence,
    /// Wide or gapless; nothing to check.
    Wide,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Shape::Backdented => "backdented",
            Shape::TallBody => "tall-body",
            Shape::TallNote => "cast",
            Shape::TallLusLus => "luslus",
            Shape::TallJog => "jog",
            Shape::Jogging0 => "0-jogging",
            Shape::Jogging1 => "1-jogging",
            Shape::Jogging2 => "2-jogging",
            Shape::PrefixJogging => "prefix-jogging",
            Shape::Sequence => "sequence",
            Shape::Wide => "wide",
        };
        f.write_str(name)
    }
}

/// LHS names shaped like tall runes: `tallBarhep`, `tallWutcolMold`, ...
static TALL_RUNE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^tall[A-Z][aeiou][a-z][a-z][aeiou][a-z](Mold)?$").expect("static pattern")
});

pub fn is_tall_rune_name(name: &str) -> bool {
    TALL_RUNE_NAME.is_match(name)
}

const JOGGING_0: &[&str] = &["tallWutbar", "tallWutpam"];
const JOGGING_1: &[&str] = &["tallWuthep", "tallCentis"];
const JOGGING_2: &[&str] = &["tallWutlus", "tallCentar"];
const PREFIX_JOGGING: &[&str] = &["tallTiscol"];
const JOG: &[&str] = &["rick5dJog", "ruck5dJog"];
const LUSLUS: &[&str] = &["LuslusCell", "LushepCell", "LustisCell"];
// wisp5d is a note for now; see `note_override` for the per-parent hook.
const NOTE: &[&str] = &[
    "tallKethep",
    "tallKetlus",
    "tallKetsig",
    "tallKetwut",
    "wisp5d",
];
const MORTAR: &[&str] = &[
    "tall5d",
    "till5d",
    "tall5dSeq",
    "till5dSeq",
    "rick5d",
    "ruck5d",
    "rick5dJog",
    "ruck5dJog",
    "wisp5d",
    "whap5d",
    "boog5d",
];

/// Partitions rule LHS names into shape classes and tags mortar
/// productions. Built once and consulted during catalog construction.
#[derive(Debug)]
pub struct Classifier {
    jogging_0: FxHashSet<&'static str>,
    jogging_1: FxHashSet<&'static str>,
    jogging_2: FxHashSet<&'static str>,
    prefix_jogging: FxHashSet<&'static str>,
    jog: FxHashSet<&'static str>,
    luslus: FxHashSet<&'static str>,
    note: FxHashSet<&'static str>,
    mortar: FxHashSet<&'static str>,
    // (lhs, parent lhs) -> shape, for rules whose note status depends on
    // the enclosing production (wisp5d).
    note_overrides: FxHashMap<(String, String), Shape>,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier {
            jogging_0: JOGGING_0.iter().copied().collect(),
            jogging_1: JOGGING_1.iter().copied().collect(),
            jogging_2: JOGGING_2.iter().copied().collect(),
            prefix_jogging: PREFIX_JOGGING.iter().copied().collect(),
            jog: JOG.iter().copied().collect(),
            luslus: LUSLUS.iter().copied().collect(),
            note: NOTE.iter().copied().collect(),
            mortar: MORTAR.iter().copied().collect(),
            note_overrides: FxHashMap::default(),
        }
    }
}

impl Classifier {
    /// The shape of a rule, from its LHS name and gapiness.
    pub fn classify(&self, lhs: &str, gapiness: i32) -> Shape {
        if gapiness == -1 {
            return Shape::Sequence;
        }
        if self.jogging_0.contains(lhs) {
            return Shape::Jogging0;
        }
        if self.jogging_1.contains(lhs) {
            return Shape::Jogging1;
        }
        if self.jogging_2.contains(lhs) {
            return Shape::Jogging2;
        }
        if self.prefix_jogging.contains(lhs) {
            return Shape::PrefixJogging;
        }
        if self.jog.contains(lhs) {
            return Shape::TallJog;
        }
        if self.luslus.contains(lhs) {
            return Shape::TallLusLus;
        }
        if self.note.contains(lhs) {
            return Shape::TallNote;
        }
        if is_tall_rune_name(lhs) {
            return Shape::TallBody;
        }
        if gapiness > 0 {
            return Shape::Backdented;
        }
        Shape::Wide
    }

    pub fn is_mortar(&self, lhs: &str) -> bool {
        self.mortar.contains(lhs)
    }

    /// Registers a per-parent shape override for a note-classified rule.
    pub fn add_note_override(&mut self, lhs: &str, parent: &str, shape: Shape) {
        self.note_overrides
            .insert((lhs.to_string(), parent.to_string()), shape);
    }

    /// The override shape for `lhs` under `parent`, if one is registered.
    pub fn note_override(&self, lhs: &str, parent: &str) -> Option<Shape> {
        self.note_overrides
            .get(&(lhs.to_string(), parent.to_string()))
            .copied()
    }
}
