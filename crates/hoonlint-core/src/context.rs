use crate::census::ChessSide;
use crate::grammar::RuleId;

/// How many enclosing productions the context remembers.
pub const ANCESTOR_WINDOW: usize = 5;

#[derive(Clone, Copy, Debug)]
pub struct Ancestor {
    pub rule: RuleId,
    pub start: usize,
}

/// Alignment an enclosing jogging computed for its jogs. Consumed by the
/// jog that uses it and cleared from the context handed to that jog's
/// children.
#[derive(Clone, Copy, Debug)]
pub struct JogContext {
    pub side: ChessSide,
    pub rune_column: usize,
    pub body_column: usize,
}

/// The lint context threaded down the walk. Each descendant receives its
/// own derived copy; nothing here is shared mutable state.
#[derive(Clone, Debug, Default)]
pub struct LintContext {
    /// Line of the enclosing node.
    pub line: usize,
    /// Columns seen on the current line, innermost last.
    pub indents: Vec<usize>,
    /// The most recent enclosing productions, oldest first.
    pub ancestors: Vec<Ancestor>,
    /// Column of the innermost enclosing tall-body rune.
    pub body_indent: Option<usize>,
    /// Column of the innermost enclosing tall rune of any kind.
    pub tall_rune_indent: Option<usize>,
    pub jog: Option<JogContext>,
    /// Name of the nearest enclosing brick production.
    pub hoon_name: Option<String>,
}

impl LintContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The alignment column for a cast at `own_column`: the innermost of
    /// the enclosing body indent, the enclosing tall-rune indent, and the
    /// cast's own column.
    pub fn note_indent(&self, own_column: usize) -> usize {
        self.body_indent
            .or(self.tall_rune_indent)
            .unwrap_or(own_column)
    }

    /// Maintains the indent stack on entry to a node at `(line, column)`.
    pub fn enter_line(&mut self, line: usize, column: usize) {
        if line != self.line {
            self.line = line;
            self.indents.clear();
            self.indents.push(column);
        } else if self.indents.last() != Some(&column) {
            self.indents.push(column);
        }
    }

    pub fn push_ancestor(&mut self, ancestor: Ancestor) {
        if self.ancestors.len() == ANCESTOR_WINDOW {
            self.ancestors.remove(0);
        }
        self.ancestors.push(ancestor);
    }

    /// The immediately enclosing production, if remembered.
    pub fn parent(&self) -> Option<&Ancestor> {
        self.ancestors.last()
    }
}
