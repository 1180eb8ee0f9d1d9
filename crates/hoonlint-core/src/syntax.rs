use crate::error::LintError;
use crate::grammar::{Catalog, RuleId, SymbolId};
use crate::internal;
use crate::location::Location;
use crate::source::Source;

/// Index of a node in its tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Interior production application.
    Node { rule: RuleId },
    /// A terminal occupying a slice of the source.
    Lexeme { symbol: SymbolId },
    /// Synthetic sibling covering the whitespace between sequence elements.
    Separator { symbol: SymbolId },
    /// Empty production.
    Null { symbol: SymbolId },
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    start: usize,
    length: usize,
    parent: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An arena-allocated CST. The arena owns every node; parent, previous-
/// and next-sibling links are plain indices, so back-references cannot
/// keep anything alive or form ownership cycles.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Tree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every node id in the arena, in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0 as usize]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.data(id).kind
    }

    pub fn start(&self, id: NodeId) -> usize {
        self.data(id).start
    }

    pub fn length(&self, id: NodeId) -> usize {
        self.data(id).length
    }

    pub fn end(&self, id: NodeId) -> usize {
        self.data(id).start + self.data(id).length
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.data(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).prev
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).next
    }

    /// The rule of an interior node.
    pub fn rule(&self, id: NodeId) -> Option<RuleId> {
        match self.data(id).kind {
            NodeKind::Node { rule } => Some(rule),
            _ => None,
        }
    }

    /// The symbol of a lexeme, separator, or null node.
    pub fn symbol(&self, id: NodeId) -> Option<SymbolId> {
        match self.data(id).kind {
            NodeKind::Lexeme { symbol }
            | NodeKind::Separator { symbol }
            | NodeKind::Null { symbol } => Some(symbol),
            NodeKind::Node { .. } => None,
        }
    }

    /// Is this node a gap: a lexeme or separator whose symbol is gap-bearing?
    pub fn is_gap(&self, id: NodeId, catalog: &Catalog) -> bool {
        match self.data(id).kind {
            NodeKind::Lexeme { symbol } | NodeKind::Separator { symbol } => {
                catalog.symbol(symbol).is_gap
            }
            _ => false,
        }
    }

    /// The gap-indents of a node: its first child plus every child that
    /// immediately follows a gap. These are exactly the positions where a
    /// line break may occur in tall form, so indentation rules constrain
    /// only these.
    pub fn gap_indents(&self, id: NodeId, catalog: &Catalog, source: &Source) -> Vec<GapIndent> {
        let children = self.children(id);
        let mut indents = Vec::with_capacity(children.len() / 2 + 1);
        let mut after_gap = true;
        for &child in children {
            if after_gap {
                indents.push(GapIndent {
                    node: child,
                    loc: source.line_column(self.start(child)),
                });
            }
            after_gap = self.is_gap(child, catalog);
        }
        indents
    }
}

/// A `(line, column)` position where a line break may occur, with the
/// child it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct GapIndent {
    pub node: NodeId,
    pub loc: Location,
}

/// Assembles a `Tree` bottom-up, enforcing the span invariants: children
/// in source order, node start equal to its first child's start, node end
/// equal to its last child's end.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(data);
        id
    }

    pub fn lexeme(&mut self, symbol: SymbolId, start: usize, length: usize) -> NodeId {
        self.push(NodeData {
            kind: NodeKind::Lexeme { symbol },
            start,
            length,
            parent: None,
            prev: None,
            next: None,
            children: Vec::new(),
        })
    }

    pub fn separator(&mut self, symbol: SymbolId, start: usize, length: usize) -> NodeId {
        self.push(NodeData {
            kind: NodeKind::Separator { symbol },
            start,
            length,
            parent: None,
            prev: None,
            next: None,
            children: Vec::new(),
        })
    }

    pub fn null(&mut self, symbol: SymbolId, start: usize) -> NodeId {
        self.push(NodeData {
            kind: NodeKind::Null { symbol },
            start,
            length: 0,
            parent: None,
            prev: None,
            next: None,
            children: Vec::new(),
        })
    }

    pub fn node(&mut self, rule: RuleId, children: Vec<NodeId>) -> Result<NodeId, LintError> {
        let first = *children
            .first()
            .ok_or_else(|| internal!("node for rule {:?} built without children", rule))?;
        let mut end = 0usize;
        let mut prev_start = None;
        for &child in &children {
            let data = &self.nodes[child.0 as usize];
            if data.parent.is_some() {
                return Err(internal!("child {:?} already has a parent", child));
            }
            if let Some(prev_start) = prev_start {
                if data.start < prev_start {
                    return Err(internal!("children of rule {:?} out of source order", rule));
                }
            }
            prev_start = Some(data.start);
            end = end.max(data.start + data.length);
        }
        let start = self.nodes[first.0 as usize].start;
        let id = self.push(NodeData {
            kind: NodeKind::Node { rule },
            start,
            length: end - start,
            parent: None,
            prev: None,
            next: None,
            children: children.clone(),
        });
        for pair in children.windows(2) {
            self.nodes[pair[0].0 as usize].next = Some(pair[1]);
            self.nodes[pair[1].0 as usize].prev = Some(pair[0]);
        }
        for &child in &children {
            self.nodes[child.0 as usize].parent = Some(id);
        }
        Ok(id)
    }

    pub fn finish(self, root: NodeId) -> Result<Tree, LintError> {
        if self.nodes[root.0 as usize].parent.is_some() {
            return Err(internal!("tree root {:?} has a parent", root));
        }
        Ok(Tree {
            nodes: self.nodes,
            root,
        })
    }
}
