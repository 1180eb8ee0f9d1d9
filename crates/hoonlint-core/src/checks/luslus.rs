use crate::diagnostic::{Mistake, MistakeKind};
use crate::syntax::GapIndent;

/// Cell-constructor arms: every child on a line after the first sits one
/// stop past the arm rune. Same-line children are unconstrained. Arms
/// carry no body-indent override.
pub fn check_luslus(gap_indents: &[GapIndent]) -> Vec<Mistake> {
    let mut mistakes = Vec::new();
    let Some(first) = gap_indents.first() else {
        return mistakes;
    };
    let expected = first.loc.column() + 2;
    let mut last_line = first.loc.line();
    for (index, indent) in gap_indents.iter().enumerate().skip(1) {
        if indent.loc.line() == last_line {
            continue;
        }
        last_line = indent.loc.line();
        if indent.loc.column() != expected {
            mistakes.push(
                Mistake::new(
                    MistakeKind::Indent,
                    format!(
                        "arm child #{index} at {}; expected column {}",
                        indent.loc,
                        expected + 1
                    ),
                    indent.loc,
                )
                .child(index)
                .expected_column(expected),
            );
        }
    }
    mistakes
}

#[cfg(test)]
mod tests {
    use crate::testing::{expect_clean, expect_mistake};

    #[test]
    fn a_split_arm_body_sits_one_stop_in() {
        expect_clean("++  foo\n  bar\n");
    }

    #[test]
    fn a_flat_arm_is_clean() {
        expect_clean("++  foo  bar\n");
    }

    #[test]
    fn an_arm_body_at_the_rune_column_is_reported() {
        expect_mistake("++  foo\nbar\n", "arm child #2 at 2:1; expected column 3");
    }

    #[test]
    fn an_overindented_arm_body_is_reported() {
        expect_mistake("++  foo\n    bar\n", "arm child #2 at 2:5; expected column 3");
    }
}
