use crate::diagnostic::{Mistake, MistakeKind};
use crate::syntax::GapIndent;

/// The default tall shape: a descending staircase. With N+1 gap-indents
/// based at index 0, the child at index `i` is expected at
/// `base + 2*(N - i + 1)` columns: one stop left per successive child,
/// the last child resting one stop past the base column. Children
/// sharing a line with the previous gap-indent are unconstrained.
pub fn check_backdented(gap_indents: &[GapIndent], base_column: Option<usize>) -> Vec<Mistake> {
    let mut mistakes = Vec::new();
    let Some(first) = gap_indents.first() else {
        return mistakes;
    };
    let base_column = base_column.unwrap_or(first.loc.column());
    let n = gap_indents.len() - 1;
    let mut last_line = first.loc.line();
    for (index, indent) in gap_indents.iter().enumerate().skip(1) {
        if indent.loc.line() == last_line {
            continue;
        }
        last_line = indent.loc.line();
        let expected = base_column + 2 * (n - index + 1);
        if indent.loc.column() != expected {
            mistakes.push(
                Mistake::new(
                    MistakeKind::Indent,
                    format!(
                        "child #{index} at {}; backdent is {}",
                        indent.loc,
                        expected + 1
                    ),
                    indent.loc,
                )
                .child(index)
                .backdent(expected),
            );
        }
    }
    mistakes
}

#[cfg(test)]
mod tests {
    use crate::testing::{expect_clean, expect_mistake, lint_source};

    #[test]
    fn a_proper_staircase_is_clean() {
        expect_clean("?:  a\n    b\n  c\n");
    }

    #[test]
    fn everything_on_the_rune_line_is_clean() {
        expect_clean("?:  a  b  c\n");
    }

    #[test]
    fn a_flat_tail_is_clean() {
        // second and third children share a line; only the break is checked
        expect_clean("?:  a\n    b  c\n");
    }

    #[test]
    fn an_overindented_child_is_reported() {
        expect_mistake("?:  a\n      b\n  c\n", "child #2 at 2:7; backdent is 5");
    }

    #[test]
    fn a_tail_at_the_base_column_is_reported() {
        expect_mistake("?:  a\n    b\nc\n", "child #3 at 3:1; backdent is 3");
    }

    #[test]
    fn three_gap_runes_start_three_stops_deep() {
        expect_clean("=/  n  1\n  n\n");
        expect_clean("=/  n\n    1\n  n\n");
        // fully split: the first child sits three stops in
        expect_clean("=/\n      n\n    1\n  n\n");
    }

    #[test]
    fn mistakes_carry_the_backdent_column() {
        let diagnostics = lint_source("?:  a\n      b\n  c\n").expect("lint");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].loc.line(), 2);
        assert_eq!(diagnostics[0].loc.column(), 6);
    }
}
