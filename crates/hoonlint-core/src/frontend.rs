use std::path::Path;

use crate::error::LintError;
use crate::grammar::Catalog;
use crate::syntax::Tree;

/// The seam between the linter and the external parser. The implementor
/// owns the grammar, builds the catalog once, and turns source text into
/// span-annotated trees via `TreeBuilder`.
pub trait Frontend {
    fn catalog(&self) -> &Catalog;
    fn parse(&self, file: &Path, source: &str) -> Result<Tree, LintError>;
}
