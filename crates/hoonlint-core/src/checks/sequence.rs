use crate::diagnostic::{Mistake, MistakeKind};
use crate::location::Location;
use crate::syntax::GapIndent;

/// Gap-separated sequences: every element either shares the previous
/// element's line or lands at the sequence's own column. Under
/// `tallSemsig` the whole sequence instead aligns one stop past the
/// grandparent rune.
pub fn check_sequence(
    gap_indents: &[GapIndent],
    seq_loc: Location,
    grandparent: Option<(&str, usize)>,
) -> Vec<Mistake> {
    let target = match grandparent {
        Some((name, column)) if name == "tallSemsig" => column + 2,
        _ => seq_loc.column(),
    };
    let mut mistakes = Vec::new();
    let mut last_line = seq_loc.line();
    for (index, indent) in gap_indents.iter().enumerate() {
        if indent.loc.line() == last_line {
            continue;
        }
        last_line = indent.loc.line();
        if indent.loc.column() != target {
            mistakes.push(
                Mistake::new(
                    MistakeKind::Sequence,
                    format!(
                        "element #{} at {}; expected column {}",
                        index + 1,
                        indent.loc,
                        target + 1
                    ),
                    indent.loc,
                )
                .child(index)
                .expected_column(target),
            );
        }
    }
    mistakes
}
