use crate::checks::backdent::check_backdented;
use crate::diagnostic::Mistake;
use crate::syntax::GapIndent;

/// Casts ("notes") backdent like everything else, but the staircase is
/// re-anchored at the note indent: the innermost enclosing body indent,
/// else the enclosing tall-rune indent, else the cast's own column. The
/// caller resolves that column from the context.
pub fn check_note(gap_indents: &[GapIndent], note_indent: usize) -> Vec<Mistake> {
    check_backdented(gap_indents, Some(note_indent))
}
