use tracing::trace;

use crate::census::{find_jogging_child, take_census, ChessSide, JoggingCensus};
use crate::checks;
use crate::classify::Shape;
use crate::context::{Ancestor, JogContext, LintContext};
use crate::diagnostic::Mistake;
use crate::error::LintError;
use crate::grammar::Catalog;
use crate::internal;
use crate::report::Reporter;
use crate::source::Source;
use crate::syntax::{NodeId, NodeKind, Tree};

/// Walks one CST in preorder, depth first, dispatching each interior node
/// to its shape checker and feeding the reporter. Sibling order follows
/// source order; the walk is purely recursive and deterministic.
pub struct Linter<'a> {
    source: &'a Source,
    tree: &'a Tree,
    catalog: &'a Catalog,
}

impl<'a> Linter<'a> {
    pub fn new(source: &'a Source, tree: &'a Tree, catalog: &'a Catalog) -> Self {
        Linter {
            source,
            tree,
            catalog,
        }
    }

    pub fn lint(&self, reporter: &mut Reporter) -> Result<(), LintError> {
        let ctx = LintContext::new();
        self.walk(self.tree.root(), &ctx, reporter)
    }

    fn walk(
        &self,
        node: NodeId,
        ctx: &LintContext,
        reporter: &mut Reporter,
    ) -> Result<(), LintError> {
        let NodeKind::Node { rule } = *self.tree.kind(node) else {
            return Ok(());
        };
        let loc = self.source.line_column(self.tree.start(node));
        let lhs_name = self.catalog.lhs_name(rule);
        let parent_name = ctx.parent().map(|a| self.catalog.lhs_name(a.rule));
        let shape = self.catalog.shape_for(rule, parent_name);
        trace!(rule = lhs_name, shape = %shape, line = loc.line(), "walk");

        // The node's own checks read the incoming (enclosing) context; the
        // derived copy below is what its children see.
        let mut child_ctx = ctx.clone();
        child_ctx.enter_line(loc.line(), loc.column());
        child_ctx.push_ancestor(Ancestor {
            rule,
            start: self.tree.start(node),
        });
        if self.catalog.is_tall_rune(rule) {
            child_ctx.tall_rune_indent = Some(loc.column());
        }
        if shape == Shape::TallBody {
            child_ctx.body_indent = Some(loc.column());
        }
        let brick = !self.catalog.is_mortar(rule);
        if brick {
            child_ctx.hoon_name = Some(lhs_name.to_string());
        }

        let gap_indents = self.tree.gap_indents(node, self.catalog, self.source);
        let mistakes: Vec<Mistake> = match shape {
            Shape::Wide => Vec::new(),
            Shape::Backdented | Shape::TallBody => {
                checks::backdent::check_backdented(&gap_indents, None)
            }
            Shape::TallNote => {
                checks::note::check_note(&gap_indents, ctx.note_indent(loc.column()))
            }
            Shape::TallLusLus => checks::luslus::check_luslus(&gap_indents),
            Shape::Sequence => {
                let grandparent = ctx.parent().map(|a| {
                    (
                        self.catalog.lhs_name(a.rule),
                        self.source.line_column(a.start).column(),
                    )
                });
                checks::sequence::check_sequence(&gap_indents, loc, grandparent)
            }
            Shape::TallJog => {
                let jog_ctx = ctx
                    .jog
                    .ok_or_else(|| internal!("jog {} outside a jogging", lhs_name))?;
                // consumed here; the jog's children do not inherit it
                child_ctx.jog = None;
                checks::jog::check_jog(self.tree, self.catalog, self.source, node, &jog_ctx)?
            }
            Shape::Jogging0 | Shape::Jogging1 | Shape::Jogging2 | Shape::PrefixJogging => {
                let census = match find_jogging_child(self.tree, self.catalog, node) {
                    Some(jogging) => {
                        take_census(self.tree, self.catalog, self.source, loc.column(), jogging)
                    }
                    // an empty jogging is a Null placeholder; use the
                    // same default an empty census yields
                    None if self.tree.children(node).iter().any(|&child| {
                        matches!(self.tree.kind(child), NodeKind::Null { .. })
                    }) =>
                    {
                        JoggingCensus {
                            side: ChessSide::Queenside,
                            body_column: loc.column() + 4,
                        }
                    }
                    None => {
                        return Err(internal!("jogging {} without a sequence child", lhs_name))
                    }
                };
                child_ctx.jog = Some(JogContext {
                    side: census.side,
                    rune_column: loc.column(),
                    body_column: census.body_column,
                });
                match shape {
                    Shape::Jogging0 => checks::jogging::check_0_jogging(
                        self.tree,
                        self.catalog,
                        self.source,
                        &gap_indents,
                        loc,
                    )?,
                    Shape::Jogging1 => checks::jogging::check_1_jogging(
                        self.tree,
                        self.catalog,
                        self.source,
                        &gap_indents,
                        loc,
                        census.side,
                    )?,
                    Shape::Jogging2 => checks::jogging::check_2_jogging(
                        self.tree,
                        self.catalog,
                        self.source,
                        &gap_indents,
                        loc,
                        census.side,
                    )?,
                    _ => checks::jogging::check_prefix_jogging(
                        self.tree,
                        self.catalog,
                        self.source,
                        &gap_indents,
                        loc,
                    )?,
                }
            }
        };

        let hoon_name = if brick {
            Some(lhs_name)
        } else {
            ctx.hoon_name.as_deref()
        };
        if reporter.census_enabled() {
            reporter.census_note(hoon_name.unwrap_or(lhs_name), shape, loc);
        }
        if !mistakes.is_empty() {
            let hoon_name = hoon_name
                .ok_or_else(|| internal!("no brick ancestor above {}", lhs_name))?
                .to_string();
            for mistake in mistakes {
                reporter.report(&hoon_name, mistake, loc.line());
            }
        }

        for &child in self.tree.children(node) {
            self.walk(child, &child_ctx, reporter)?;
        }
        Ok(())
    }
}
