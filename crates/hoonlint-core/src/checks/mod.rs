//! Shape checkers: one submodule per whitespace shape. Each checker takes
//! the gap-indents of a node plus whatever the context supplies and
//! returns the mistakes it found; it never aborts the walk.

pub mod backdent;
pub mod jog;
pub mod jogging;
pub mod luslus;
pub mod note;
pub mod sequence;
