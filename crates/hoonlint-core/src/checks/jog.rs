use crate::census::{jog_parts, ChessSide};
use crate::context::JogContext;
use crate::diagnostic::{Mistake, MistakeKind};
use crate::error::LintError;
use crate::grammar::Catalog;
use crate::internal;
use crate::source::Source;
use crate::syntax::{NodeId, Tree};

/// One jog under a jogging. The enclosing jogging supplies the sidedness,
/// its rune column, and the aligned body column; this check consumes all
/// three.
///
/// Kingside heads sit one stop past the rune, queenside heads two. A
/// split body sits one stop past the head kingside ("seaside") and one
/// stop *less* queenside. A flat body with a wider-than-minimal gap must
/// land on the aligned body column; a minimal two-column gap is accepted
/// as unaligned.
pub fn check_jog(
    tree: &Tree,
    catalog: &Catalog,
    source: &Source,
    jog: NodeId,
    ctx: &JogContext,
) -> Result<Vec<Mistake>, LintError> {
    let (head, gap, body) =
        jog_parts(tree, catalog, jog).ok_or_else(|| internal!("jog without head, gap, body"))?;
    let head_loc = source.line_column(tree.start(head));
    let body_loc = source.line_column(tree.start(body));
    let mut mistakes = Vec::new();

    let (head_expected, split_body_expected) = match ctx.side {
        ChessSide::Kingside => (ctx.rune_column + 2, ctx.rune_column + 4),
        ChessSide::Queenside => (ctx.rune_column + 4, ctx.rune_column + 2),
    };

    if head_loc.column() != head_expected {
        let observed = head_loc.column();
        let (direction, stops) = if observed < head_expected {
            ("under", head_expected - observed)
        } else {
            ("over", observed - head_expected)
        };
        mistakes.push(
            Mistake::new(
                MistakeKind::Indent,
                format!(
                    "Jog {} head at {}; {}indented by {}",
                    ctx.side, head_loc, direction, stops
                ),
                head_loc,
            )
            .expected_column(head_expected),
        );
    }

    if head_loc.line() != body_loc.line() {
        if body_loc.column() != split_body_expected {
            mistakes.push(
                Mistake::new(
                    MistakeKind::Indent,
                    format!(
                        "Jog {} split body at {}; expected column {}",
                        ctx.side,
                        body_loc,
                        split_body_expected + 1
                    ),
                    body_loc,
                )
                .expected_column(split_body_expected),
            );
        }
    } else if tree.length(gap) != 2 && body_loc.column() != ctx.body_column {
        mistakes.push(
            Mistake::new(
                MistakeKind::Indent,
                format!(
                    "Jog {} flat body at {}; expected column {}",
                    ctx.side,
                    body_loc,
                    ctx.body_column + 1
                ),
                body_loc,
            )
            .expected_column(ctx.body_column),
        );
    }

    Ok(mistakes)
}

#[cfg(test)]
mod tests {
    use crate::testing::{expect_clean, expect_mistake, lint_source};

    #[test]
    fn a_well_formed_kingside_jogging_is_clean() {
        expect_clean("?-  x\n  %a  1\n  %b  2\n==\n");
    }

    #[test]
    fn an_underindented_kingside_head_is_reported() {
        expect_mistake("?-  x\n %a  1\n==\n", "Jog kingside head at 2:2; underindented by 1");
    }

    #[test]
    fn an_overindented_kingside_head_is_reported() {
        expect_mistake(
            "?-  x\n   %a  1\n  %b  2\n  %c  3\n==\n",
            "Jog kingside head at 2:4; overindented by 1",
        );
    }

    #[test]
    fn a_kingside_split_body_is_seaside() {
        expect_clean("?-  x\n  %a\n    1\n==\n");
        expect_mistake(
            "?-  x\n  %a\n      1\n==\n",
            "Jog kingside split body at 3:7; expected column 5",
        );
    }

    #[test]
    fn a_queenside_split_body_comes_back_a_stop() {
        expect_clean("?-    x\n    %a\n  1\n    %b  2\n==\n");
        expect_mistake(
            "?-    x\n    %a\n      1\n    %b  2\n==\n",
            "Jog queenside split body at 3:7; expected column 3",
        );
    }

    #[test]
    fn aligned_flat_bodies_must_agree() {
        let diagnostics = lint_source("?-  x\n  %a    1\n  %bcd    2\n  %e    3\n==\n").expect("lint");
        // columns 8, 10, 8: the column-10 body disagrees with the census
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0]
            .description
            .contains("Jog kingside flat body at 3:11; expected column 9"));
    }

    #[test]
    fn minimal_gaps_are_unaligned_and_accepted() {
        expect_clean("?-  x\n  %a  1\n  %bcd  2\n==\n");
    }
}
