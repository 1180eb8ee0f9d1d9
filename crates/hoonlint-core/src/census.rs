use std::fmt;

use tracing::debug;

use crate::classify::Shape;
use crate::grammar::Catalog;
use crate::source::Source;
use crate::syntax::{NodeId, NodeKind, Tree};

/// Indentation bias of a jog or jogging: kingside heads sit one stop after
/// the rune, queenside heads two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChessSide {
    Kingside,
    Queenside,
}

impl fmt::Display for ChessSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChessSide::Kingside => f.write_str("kingside"),
            ChessSide::Queenside => f.write_str("queenside"),
        }
    }
}

/// What a jogging's jogs agree on: the sidedness and the column flat
/// bodies align to.
#[derive(Clone, Copy, Debug)]
pub struct JoggingCensus {
    pub side: ChessSide,
    pub body_column: usize,
}

struct ColumnTally {
    column: usize,
    count: usize,
    first_line: usize,
}

/// Inspects a jogging sequence to decide its chess-sidedness and aligned
/// body column.
///
/// A jog is queenside when its head sits two or more stops past the rune.
/// The jogging is kingside only when kingside jogs strictly outnumber
/// queenside ones, so ties resolve queenside.
///
/// A flat jog participates in the body-column census when its head/body
/// gap is wider than one stop; a gap of exactly two columns is the minimal
/// separator and counts as unaligned. The winning column maximizes
/// `(occurrences, earliest line)`, later-traversed columns winning full
/// ties. With no aligned jog, the first jog body column seen is used.
pub fn take_census(
    tree: &Tree,
    catalog: &Catalog,
    source: &Source,
    rune_column: usize,
    jogging: NodeId,
) -> JoggingCensus {
    let mut kingside = 0usize;
    let mut queenside = 0usize;
    let mut tallies: Vec<ColumnTally> = Vec::new();
    let mut first_body = None;

    for &child in tree.children(jogging) {
        if !is_jog(tree, catalog, child) {
            continue;
        }
        let Some((head, gap, body)) = jog_parts(tree, catalog, child) else {
            continue;
        };
        let head_loc = source.line_column(tree.start(head));
        if head_loc.column() >= rune_column + 4 {
            queenside += 1;
        } else {
            kingside += 1;
        }
        let body_loc = source.line_column(tree.start(body));
        if first_body.is_none() {
            first_body = Some(body_loc.column());
        }
        let flat = head_loc.line() == body_loc.line();
        if flat && tree.length(gap) > 2 {
            match tallies.iter_mut().find(|t| t.column == body_loc.column()) {
                Some(tally) => {
                    tally.count += 1;
                    tally.first_line = tally.first_line.min(body_loc.line());
                }
                None => tallies.push(ColumnTally {
                    column: body_loc.column(),
                    count: 1,
                    first_line: body_loc.line(),
                }),
            }
        }
    }

    let side = if kingside > queenside {
        ChessSide::Kingside
    } else {
        ChessSide::Queenside
    };

    let mut best: Option<&ColumnTally> = None;
    for tally in &tallies {
        let wins = match best {
            None => true,
            Some(current) => {
                tally.count > current.count
                    || (tally.count == current.count && tally.first_line <= current.first_line)
            }
        };
        if wins {
            best = Some(tally);
        }
    }
    let body_column = best
        .map(|tally| tally.column)
        .or(first_body)
        .unwrap_or(rune_column + 4);

    debug!(side = %side, body_column, kingside, queenside, "jogging census");
    JoggingCensus { side, body_column }
}

/// The sequence child holding a jogging's jogs.
pub(crate) fn find_jogging_child(tree: &Tree, catalog: &Catalog, node: NodeId) -> Option<NodeId> {
    tree.children(node).iter().copied().find(|&child| {
        matches!(tree.kind(child), NodeKind::Node { rule } if catalog.shape(*rule) == Shape::Sequence)
    })
}

pub(crate) fn is_jog(tree: &Tree, catalog: &Catalog, node: NodeId) -> bool {
    matches!(tree.kind(node), NodeKind::Node { rule } if catalog.shape(*rule) == Shape::TallJog)
}

/// The `(head, gap, body)` children of a jog.
pub(crate) fn jog_parts(
    tree: &Tree,
    catalog: &Catalog,
    jog: NodeId,
) -> Option<(NodeId, NodeId, NodeId)> {
    let children = tree.children(jog);
    let head = *children.first()?;
    let gap_ix = children[1..]
        .iter()
        .position(|&child| tree.is_gap(child, catalog))?
        + 1;
    let body = *children.get(gap_ix + 1)?;
    Some((head, children[gap_ix], body))
}
