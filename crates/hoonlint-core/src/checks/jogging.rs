use crate::census::ChessSide;
use crate::diagnostic::{Mistake, MistakeKind};
use crate::error::LintError;
use crate::grammar::Catalog;
use crate::internal;
use crate::location::Location;
use crate::source::Source;
use crate::syntax::{GapIndent, NodeKind, Tree};

/// Validates a closing `==`: never on the rune line, and at the expected
/// column. Column misalignment is suppressed when the two bytes at the
/// reported position are not literally `==`, since the parser's
/// terminator recovery may have fabricated the lexeme.
fn check_tistis(
    tree: &Tree,
    source: &Source,
    rune: Location,
    expected_column: usize,
    tistis: &GapIndent,
) -> Vec<Mistake> {
    if tistis.loc.line() == rune.line() {
        return vec![Mistake::new(
            MistakeKind::Indent,
            "TISTIS on rune line; should not be.",
            tistis.loc,
        )
        .expected_line(rune.line() + 1)];
    }
    if tistis.loc.column() != expected_column {
        if source.literal(tree.start(tistis.node), 2) != "==" {
            return Vec::new();
        }
        return vec![Mistake::new(
            MistakeKind::Indent,
            format!(
                "TISTIS at {}; expected column {}",
                tistis.loc,
                expected_column + 1
            ),
            tistis.loc,
        )
        .expected_column(expected_column)];
    }
    Vec::new()
}

/// The gap-indent holding the closing `==`, by symbol name.
fn tistis_index(
    tree: &Tree,
    catalog: &Catalog,
    gap_indents: &[GapIndent],
) -> Result<usize, LintError> {
    gap_indents
        .iter()
        .rposition(|indent| match tree.kind(indent.node) {
            NodeKind::Lexeme { symbol } => catalog.symbol(*symbol).name == "TISTIS",
            _ => false,
        })
        .ok_or_else(|| internal!("jogging without a closing TISTIS"))
}

/// No head: the child after the rune is either on the rune line or one
/// stop in; the terminator returns to the rune column.
pub fn check_0_jogging(
    tree: &Tree,
    catalog: &Catalog,
    source: &Source,
    gap_indents: &[GapIndent],
    rune: Location,
) -> Result<Vec<Mistake>, LintError> {
    let tistis = tistis_index(tree, catalog, gap_indents)?;
    let mut mistakes = Vec::new();
    if let Some(first) = gap_indents.get(1) {
        // an empty jogging leaves a Null placeholder with no position of
        // its own to hold anywhere
        let placeholder = matches!(tree.kind(first.node), NodeKind::Null { .. });
        if tistis != 1
            && !placeholder
            && first.loc.line() != rune.line()
            && first.loc.column() != rune.column() + 2
        {
            mistakes.push(
                Mistake::new(
                    MistakeKind::Indent,
                    format!(
                        "0-jogging child at {}; expected column {}",
                        first.loc,
                        rune.column() + 3
                    ),
                    first.loc,
                )
                .child(1)
                .expected_column(rune.column() + 2),
            );
        }
    }
    mistakes.extend(check_tistis(
        tree,
        source,
        rune,
        rune.column(),
        &gap_indents[tistis],
    ));
    Ok(mistakes)
}

/// One head, on the rune line, two stops past the rune kingside and three
/// queenside; the terminator returns to the rune column.
pub fn check_1_jogging(
    tree: &Tree,
    catalog: &Catalog,
    source: &Source,
    gap_indents: &[GapIndent],
    rune: Location,
    side: ChessSide,
) -> Result<Vec<Mistake>, LintError> {
    let tistis = tistis_index(tree, catalog, gap_indents)?;
    let mut mistakes = Vec::new();
    let head = gap_indents
        .get(1)
        .filter(|_| tistis > 1)
        .ok_or_else(|| internal!("1-jogging without a head"))?;
    if head.loc.line() != rune.line() {
        mistakes.push(
            Mistake::new(
                MistakeKind::Indent,
                format!(
                    "1-jogging head at {}; should be on rune line {}",
                    head.loc,
                    rune.line()
                ),
                head.loc,
            )
            .child(1)
            .expected_line(rune.line()),
        );
    } else {
        let expected = match side {
            ChessSide::Kingside => rune.column() + 4,
            ChessSide::Queenside => rune.column() + 6,
        };
        if head.loc.column() != expected {
            mistakes.push(
                Mistake::new(
                    MistakeKind::Indent,
                    format!(
                        "1-jogging {} head at {}; expected column {}",
                        side,
                        head.loc,
                        expected + 1
                    ),
                    head.loc,
                )
                .child(1)
                .expected_column(expected),
            );
        }
    }
    mistakes.extend(check_tistis(
        tree,
        source,
        rune,
        rune.column(),
        &gap_indents[tistis],
    ));
    Ok(mistakes)
}

/// Head and subhead: the head on the rune line three stops past the rune
/// kingside (four queenside); the subhead either on the rune line or one
/// stop left of the head; the terminator returns to the rune column.
pub fn check_2_jogging(
    tree: &Tree,
    catalog: &Catalog,
    source: &Source,
    gap_indents: &[GapIndent],
    rune: Location,
    side: ChessSide,
) -> Result<Vec<Mistake>, LintError> {
    let tistis = tistis_index(tree, catalog, gap_indents)?;
    if tistis <= 2 {
        return Err(internal!("2-jogging without a head and subhead"));
    }
    let mut mistakes = Vec::new();
    let (head_expected, subhead_expected) = match side {
        ChessSide::Kingside => (rune.column() + 6, rune.column() + 4),
        ChessSide::Queenside => (rune.column() + 8, rune.column() + 6),
    };
    let head = &gap_indents[1];
    if head.loc.line() != rune.line() {
        mistakes.push(
            Mistake::new(
                MistakeKind::Indent,
                format!(
                    "2-jogging head at {}; should be on rune line {}",
                    head.loc,
                    rune.line()
                ),
                head.loc,
            )
            .child(1)
            .expected_line(rune.line()),
        );
    } else if head.loc.column() != head_expected {
        mistakes.push(
            Mistake::new(
                MistakeKind::Indent,
                format!(
                    "2-jogging {} head at {}; expected column {}",
                    side,
                    head.loc,
                    head_expected + 1
                ),
                head.loc,
            )
            .child(1)
            .expected_column(head_expected),
        );
    }
    let subhead = &gap_indents[2];
    if subhead.loc.line() != rune.line() && subhead.loc.column() != subhead_expected {
        mistakes.push(
            Mistake::new(
                MistakeKind::Indent,
                format!(
                    "2-jogging {} subhead at {}; expected column {}",
                    side,
                    subhead.loc,
                    subhead_expected + 1
                ),
                subhead.loc,
            )
            .child(2)
            .expected_column(subhead_expected),
        );
    }
    mistakes.extend(check_tistis(
        tree,
        source,
        rune,
        rune.column(),
        &gap_indents[tistis],
    ));
    Ok(mistakes)
}

/// Jogging first: the terminator sits one stop past the rune and the tail
/// after it returns to the rune column. Only kingside layouts are
/// attested; the tail column is side-independent here.
pub fn check_prefix_jogging(
    tree: &Tree,
    catalog: &Catalog,
    source: &Source,
    gap_indents: &[GapIndent],
    rune: Location,
) -> Result<Vec<Mistake>, LintError> {
    let tistis = tistis_index(tree, catalog, gap_indents)?;
    let mut mistakes = check_tistis(tree, source, rune, rune.column() + 2, &gap_indents[tistis]);
    if let Some(tail) = gap_indents.get(tistis + 1) {
        if tail.loc.line() != rune.line() && tail.loc.column() != rune.column() {
            mistakes.push(
                Mistake::new(
                    MistakeKind::Indent,
                    format!(
                        "jogging-1 tail at {}; expected column {}",
                        tail.loc,
                        rune.column() + 1
                    ),
                    tail.loc,
                )
                .expected_column(rune.column()),
            );
        }
    }
    Ok(mistakes)
}

#[cfg(test)]
mod tests {
    use crate::testing::{expect_clean, expect_mistake, lint_source};

    #[test]
    fn a_0_jogging_with_the_terminator_inline_is_reported() {
        expect_mistake("?|  a  b  ==\n", "TISTIS on rune line; should not be.");
    }

    #[test]
    fn a_0_jogging_with_a_proper_terminator_is_clean() {
        expect_clean("?|  a\n    b\n==\n");
    }

    #[test]
    fn a_misaligned_terminator_is_reported() {
        expect_mistake("?|  a\n    b\n  ==\n", "TISTIS at 3:3; expected column 1");
    }

    #[test]
    fn a_1_jogging_head_off_the_rune_line_is_reported() {
        expect_mistake(
            "?-\n    x\n  %a  1\n==\n",
            "1-jogging head at 2:5; should be on rune line 1",
        );
    }

    #[test]
    fn a_1_jogging_head_off_its_stop_is_reported() {
        expect_mistake(
            "?-   x\n  %a  1\n==\n",
            "1-jogging kingside head at 1:6; expected column 5",
        );
    }

    #[test]
    fn a_queenside_1_jogging_head_sits_three_stops_in() {
        expect_clean("?-    x\n    %a  1\n    %b  2\n==\n");
    }

    #[test]
    fn a_2_jogging_is_checked_head_subhead_and_terminator() {
        expect_clean("?+    x  y\n  %a  1\n==\n");
        expect_mistake(
            "?+  x  y\n  %a  1\n==\n",
            "2-jogging kingside head at 1:5; expected column 7",
        );
    }

    #[test]
    fn a_2_jogging_subhead_may_split_one_stop_left_of_the_head() {
        expect_clean("?+    x\n    y\n  %a  1\n==\n");
        expect_mistake(
            "?+    x\n      y\n  %a  1\n==\n",
            "2-jogging kingside subhead at 2:7; expected column 5",
        );
    }

    #[test]
    fn a_prefix_jogging_terminator_sits_one_stop_in() {
        expect_clean("=:  a  1\n    b  2\n  ==\nc\n");
        expect_mistake(
            "=:  a  1\n    b  2\n==\nc\n",
            "TISTIS at 3:1; expected column 3",
        );
    }

    #[test]
    fn a_prefix_jogging_tail_returns_to_the_rune_column() {
        expect_mistake(
            "=:  a  1\n    b  2\n  ==\n  c\n",
            "jogging-1 tail at 4:3; expected column 1",
        );
    }

    #[test]
    fn an_empty_running_still_checks_its_terminator() {
        expect_clean("?|\n==\n");
        expect_mistake("?|  ==\n", "TISTIS on rune line; should not be.");
        expect_mistake("?|\n  ==\n", "TISTIS at 2:3; expected column 1");
    }

    #[test]
    fn a_fabricated_terminator_is_not_checked_for_column() {
        // the fixture parser inserts a zero-width terminator when `==` is
        // missing; its column never matches, but no mistake is reported
        let diagnostics = lint_source("?|  a\n    b").expect("lint");
        assert!(diagnostics.is_empty());
    }
}
