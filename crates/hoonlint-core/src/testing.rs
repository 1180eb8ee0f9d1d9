//! Test scaffolding: a fixture grammar covering the rune families the
//! suite drives, a small tall-form parser over it, and assertion helpers.
//! The fixture parser is not the production parser (which plugs in through
//! `Frontend`); it exists so scenario tests can run the full pipeline from
//! literal source text.

use std::path::Path;

use crate::diagnostic::Diagnostic;
use crate::error::LintError;
use crate::filter::FilterList;
use crate::frontend::Frontend;
use crate::grammar::{Catalog, GrammarSource, RuleId, SymbolId};
use crate::report::Reporter;
use crate::source::Source;
use crate::syntax::{NodeId, Tree, TreeBuilder};
use crate::walk::Linter;

struct SymbolSpec {
    name: &'static str,
    lexeme: bool,
}

struct RuleSpec {
    lhs: &'static str,
    rhs: &'static [&'static str],
    separator: Option<&'static str>,
}

const SYMBOLS: &[SymbolSpec] = &[
    SymbolSpec { name: "GAP", lexeme: true },
    SymbolSpec { name: "WUTHEP", lexeme: true },
    SymbolSpec { name: "WUTBAR", lexeme: true },
    SymbolSpec { name: "WUTPAM", lexeme: true },
    SymbolSpec { name: "WUTLUS", lexeme: true },
    SymbolSpec { name: "WUTCOL", lexeme: true },
    SymbolSpec { name: "CENTIS", lexeme: true },
    SymbolSpec { name: "TISCOL", lexeme: true },
    SymbolSpec { name: "TISFAS", lexeme: true },
    SymbolSpec { name: "KETHEP", lexeme: true },
    SymbolSpec { name: "SEMSIG", lexeme: true },
    SymbolSpec { name: "LUSLUS", lexeme: true },
    SymbolSpec { name: "TISTIS", lexeme: true },
    SymbolSpec { name: "TERM", lexeme: true },
    SymbolSpec { name: "NAME", lexeme: true },
    SymbolSpec { name: "NUM", lexeme: true },
    SymbolSpec { name: "tall5d", lexeme: false },
    SymbolSpec { name: "tall5dSeq", lexeme: false },
    SymbolSpec { name: "rick5d", lexeme: false },
    SymbolSpec { name: "ruck5d", lexeme: false },
    SymbolSpec { name: "rick5dJog", lexeme: false },
    SymbolSpec { name: "ruck5dJog", lexeme: false },
    SymbolSpec { name: "tallWuthep", lexeme: false },
    SymbolSpec { name: "tallWutbar", lexeme: false },
    SymbolSpec { name: "tallWutpam", lexeme: false },
    SymbolSpec { name: "tallWutlus", lexeme: false },
    SymbolSpec { name: "tallWutcol", lexeme: false },
    SymbolSpec { name: "tallCentis", lexeme: false },
    SymbolSpec { name: "tallTiscol", lexeme: false },
    SymbolSpec { name: "tallTisfas", lexeme: false },
    SymbolSpec { name: "tallKethep", lexeme: false },
    SymbolSpec { name: "tallSemsig", lexeme: false },
    SymbolSpec { name: "LuslusCell", lexeme: false },
];

const RULES: &[RuleSpec] = &[
    RuleSpec {
        lhs: "tallWuthep",
        rhs: &["WUTHEP", "GAP", "tall5d", "GAP", "ruck5d", "GAP", "TISTIS"],
        separator: None,
    },
    RuleSpec {
        lhs: "tallCentis",
        rhs: &["CENTIS", "GAP", "tall5d", "GAP", "rick5d", "GAP", "TISTIS"],
        separator: None,
    },
    RuleSpec {
        lhs: "tallWutbar",
        rhs: &["WUTBAR", "GAP", "tall5dSeq", "GAP", "TISTIS"],
        separator: None,
    },
    RuleSpec {
        lhs: "tallWutpam",
        rhs: &["WUTPAM", "GAP", "tall5dSeq", "GAP", "TISTIS"],
        separator: None,
    },
    RuleSpec {
        lhs: "tallWutlus",
        rhs: &[
            "WUTLUS", "GAP", "tall5d", "GAP", "tall5d", "GAP", "ruck5d", "GAP", "TISTIS",
        ],
        separator: None,
    },
    RuleSpec {
        lhs: "tallWutcol",
        rhs: &["WUTCOL", "GAP", "tall5d", "GAP", "tall5d", "GAP", "tall5d"],
        separator: None,
    },
    RuleSpec {
        lhs: "tallTiscol",
        rhs: &["TISCOL", "GAP", "rick5d", "GAP", "TISTIS", "GAP", "tall5d"],
        separator: None,
    },
    RuleSpec {
        lhs: "tallTisfas",
        rhs: &["TISFAS", "GAP", "tall5d", "GAP", "tall5d", "GAP", "tall5d"],
        separator: None,
    },
    RuleSpec {
        lhs: "tallKethep",
        rhs: &["KETHEP", "GAP", "tall5d", "GAP", "tall5d"],
        separator: None,
    },
    RuleSpec {
        lhs: "tallSemsig",
        rhs: &["SEMSIG", "GAP", "tall5dSeq"],
        separator: None,
    },
    RuleSpec {
        lhs: "LuslusCell",
        rhs: &["LUSLUS", "GAP", "NAME", "GAP", "tall5d"],
        separator: None,
    },
    RuleSpec {
        lhs: "ruck5dJog",
        rhs: &["tall5d", "GAP", "tall5d"],
        separator: None,
    },
    RuleSpec {
        lhs: "rick5dJog",
        rhs: &["tall5d", "GAP", "tall5d"],
        separator: None,
    },
    RuleSpec {
        lhs: "ruck5d",
        rhs: &["ruck5dJog"],
        separator: Some("GAP"),
    },
    RuleSpec {
        lhs: "rick5d",
        rhs: &["rick5dJog"],
        separator: Some("GAP"),
    },
    RuleSpec {
        lhs: "tall5dSeq",
        rhs: &["tall5d"],
        separator: Some("GAP"),
    },
];

fn symbol_index(name: &str) -> SymbolId {
    let index = SYMBOLS
        .iter()
        .position(|spec| spec.name == name)
        .unwrap_or_else(|| panic!("fixture grammar has no symbol {name:?}"));
    SymbolId(index as u32)
}

fn rule_index(lhs: &str) -> RuleId {
    let index = RULES
        .iter()
        .position(|spec| spec.lhs == lhs)
        .unwrap_or_else(|| panic!("fixture grammar has no rule {lhs:?}"));
    RuleId(index as u32)
}

/// The fixture grammar as a `GrammarSource`, the way the external parser
/// would describe its own grammar.
pub struct FixtureGrammar;

impl GrammarSource for FixtureGrammar {
    fn symbol_ids(&self) -> Vec<SymbolId> {
        (0..SYMBOLS.len() as u32).map(SymbolId).collect()
    }

    fn symbol_name(&self, id: SymbolId) -> String {
        SYMBOLS[id.0 as usize].name.to_string()
    }

    fn symbol_is_lexeme(&self, id: SymbolId) -> bool {
        SYMBOLS[id.0 as usize].lexeme
    }

    fn rule_ids(&self) -> Vec<RuleId> {
        (0..RULES.len() as u32).map(RuleId).collect()
    }

    fn rule_expand(&self, id: RuleId) -> (SymbolId, Vec<SymbolId>) {
        let spec = &RULES[id.0 as usize];
        (
            symbol_index(spec.lhs),
            spec.rhs.iter().map(|name| symbol_index(name)).collect(),
        )
    }

    fn rule_separator(&self, id: RuleId) -> Option<SymbolId> {
        RULES[id.0 as usize].separator.map(symbol_index)
    }
}

pub fn fixture_grammar() -> FixtureGrammar {
    FixtureGrammar
}

/// A `Frontend` over the fixture grammar with a recursive-descent parser
/// for tall-form snippets.
pub struct FixtureFrontend {
    catalog: Catalog,
}

pub fn fixture() -> FixtureFrontend {
    FixtureFrontend {
        catalog: Catalog::from_grammar(&FixtureGrammar).expect("fixture grammar is well formed"),
    }
}

impl FixtureFrontend {
    pub fn symbol_named(&self, name: &str) -> SymbolId {
        symbol_index(name)
    }

    pub fn rule_named(&self, lhs: &str) -> RuleId {
        rule_index(lhs)
    }
}

impl Frontend for FixtureFrontend {
    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn parse(&self, file: &Path, source: &str) -> Result<Tree, LintError> {
        let mut builder = TreeBuilder::new();
        let root = {
            let mut parser = Parser {
                file,
                src: source.as_bytes(),
                pos: 0,
                builder: &mut builder,
            };
            parser.parse()?
        };
        builder.finish(root)
    }
}

struct Parser<'a, 'b> {
    file: &'a Path,
    src: &'a [u8],
    pos: usize,
    builder: &'b mut TreeBuilder,
}

impl Parser<'_, '_> {
    fn error(&self, message: &str) -> LintError {
        LintError::Parse {
            file: self.file.to_path_buf(),
            message: format!("{message} at offset {}", self.pos),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek2(&self) -> Option<&[u8]> {
        self.src.get(self.pos..self.pos + 2)
    }

    fn next_is_tistis(&self) -> bool {
        matches!(self.peek2(), Some(b"=="))
    }

    /// Consumes a run of spaces and newlines, returning its span.
    fn scan_gap(&mut self) -> (usize, usize) {
        let start = self.pos;
        while matches!(self.src.get(self.pos), Some(&b' ') | Some(&b'\n')) {
            self.pos += 1;
        }
        (start, self.pos - start)
    }

    fn gap_node(&mut self) -> Result<NodeId, LintError> {
        let (start, length) = self.scan_gap();
        if length == 0 {
            return Err(self.error("expected whitespace"));
        }
        Ok(self.builder.lexeme(symbol_index("GAP"), start, length))
    }

    fn two_byte_lexeme(&mut self, symbol: SymbolId) -> NodeId {
        let node = self.builder.lexeme(symbol, self.pos, 2);
        self.pos += 2;
        node
    }

    fn parse(&mut self) -> Result<NodeId, LintError> {
        let root = self.parse_expr()?;
        self.scan_gap();
        if !self.at_end() {
            return Err(self.error("trailing input"));
        }
        Ok(root)
    }

    fn parse_expr(&mut self) -> Result<NodeId, LintError> {
        match self.peek2() {
            Some(b"?-") => self.jogging1("WUTHEP", "tallWuthep", "ruck5dJog", "ruck5d"),
            Some(b"%=") => self.jogging1("CENTIS", "tallCentis", "rick5dJog", "rick5d"),
            Some(b"?|") => self.running0("WUTBAR", "tallWutbar"),
            Some(b"?&") => self.running0("WUTPAM", "tallWutpam"),
            Some(b"?+") => self.jogging2("WUTLUS", "tallWutlus"),
            Some(b"?:") => self.fixed_arity("WUTCOL", "tallWutcol", 3),
            Some(b"=/") => self.fixed_arity("TISFAS", "tallTisfas", 3),
            Some(b"=:") => self.prefix_jogging("TISCOL", "tallTiscol"),
            Some(b"^-") => self.fixed_arity("KETHEP", "tallKethep", 2),
            Some(b";~") | Some(b";;") => self.semsig(),
            Some(b"++") => self.luslus(),
            Some(b"==") => Err(self.error("unexpected terminator")),
            _ => self.leaf(),
        }
    }

    fn leaf(&mut self) -> Result<NodeId, LintError> {
        let start = self.pos;
        match self.src.get(self.pos).copied() {
            Some(b'%') => {
                self.pos += 1;
                self.take_while(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit());
                if self.pos - start < 2 {
                    return Err(self.error("expected a term after %"));
                }
                Ok(self
                    .builder
                    .lexeme(symbol_index("TERM"), start, self.pos - start))
            }
            Some(byte) if byte.is_ascii_lowercase() => {
                self.take_while(|byte| {
                    byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-'
                });
                Ok(self
                    .builder
                    .lexeme(symbol_index("NAME"), start, self.pos - start))
            }
            Some(byte) if byte.is_ascii_digit() => {
                self.take_while(|byte| byte.is_ascii_digit());
                Ok(self
                    .builder
                    .lexeme(symbol_index("NUM"), start, self.pos - start))
            }
            _ => Err(self.error("unexpected character")),
        }
    }

    fn take_while(&mut self, keep: impl Fn(u8) -> bool) {
        while matches!(self.src.get(self.pos), Some(&byte) if keep(byte)) {
            self.pos += 1;
        }
    }

    fn fixed_arity(
        &mut self,
        symbol: &str,
        rule: &str,
        arity: usize,
    ) -> Result<NodeId, LintError> {
        let mut children = vec![self.two_byte_lexeme(symbol_index(symbol))];
        for _ in 0..arity {
            children.push(self.gap_node()?);
            children.push(self.parse_expr()?);
        }
        self.builder.node(rule_index(rule), children)
    }

    fn luslus(&mut self) -> Result<NodeId, LintError> {
        let rune = self.two_byte_lexeme(symbol_index("LUSLUS"));
        let gap1 = self.gap_node()?;
        let name = self.leaf()?;
        let gap2 = self.gap_node()?;
        let body = self.parse_expr()?;
        self.builder
            .node(rule_index("LuslusCell"), vec![rune, gap1, name, gap2, body])
    }

    fn semsig(&mut self) -> Result<NodeId, LintError> {
        let rune = self.two_byte_lexeme(symbol_index("SEMSIG"));
        let gap = self.gap_node()?;
        let mut elements = vec![self.parse_expr()?];
        loop {
            let save = self.pos;
            let (sep_start, sep_length) = self.scan_gap();
            if sep_length == 0 || self.at_end() || self.next_is_tistis() {
                self.pos = save;
                break;
            }
            elements.push(
                self.builder
                    .separator(symbol_index("GAP"), sep_start, sep_length),
            );
            elements.push(self.parse_expr()?);
        }
        let seq = self.builder.node(rule_index("tall5dSeq"), elements)?;
        self.builder
            .node(rule_index("tallSemsig"), vec![rune, gap, seq])
    }

    /// Parses a terminated, gap-separated run of `parse` results, ending
    /// at `==` or, as terminator recovery, at end of input with a
    /// zero-width `TISTIS`. An immediately-terminated run is empty and
    /// becomes a `Null` placeholder in the sequence position.
    fn terminated_run(
        &mut self,
        seq_rule: &str,
        parse: impl Fn(&mut Self) -> Result<NodeId, LintError>,
    ) -> Result<(NodeId, NodeId, NodeId), LintError> {
        if self.next_is_tistis() {
            let empty = self.builder.null(symbol_index(seq_rule), self.pos);
            let gap = self.builder.lexeme(symbol_index("GAP"), self.pos, 0);
            let tistis = self.two_byte_lexeme(symbol_index("TISTIS"));
            return Ok((empty, gap, tistis));
        }
        let mut elements = vec![parse(&mut *self)?];
        loop {
            let (gap_start, gap_length) = self.scan_gap();
            if self.next_is_tistis() {
                let gap = self
                    .builder
                    .lexeme(symbol_index("GAP"), gap_start, gap_length);
                let tistis = self.two_byte_lexeme(symbol_index("TISTIS"));
                let seq = self.builder.node(rule_index(seq_rule), elements)?;
                return Ok((seq, gap, tistis));
            }
            if self.at_end() {
                let gap = self
                    .builder
                    .lexeme(symbol_index("GAP"), gap_start, gap_length);
                let tistis = self.builder.lexeme(symbol_index("TISTIS"), self.pos, 0);
                let seq = self.builder.node(rule_index(seq_rule), elements)?;
                return Ok((seq, gap, tistis));
            }
            if gap_length == 0 {
                return Err(self.error("expected whitespace"));
            }
            elements.push(
                self.builder
                    .separator(symbol_index("GAP"), gap_start, gap_length),
            );
            elements.push(parse(&mut *self)?);
        }
    }

    fn parse_jog(&mut self, jog_rule: &str) -> Result<NodeId, LintError> {
        let head = self.parse_expr()?;
        let gap = self.gap_node()?;
        let body = self.parse_expr()?;
        self.builder
            .node(rule_index(jog_rule), vec![head, gap, body])
    }

    fn running0(&mut self, symbol: &str, rule: &str) -> Result<NodeId, LintError> {
        let rune = self.two_byte_lexeme(symbol_index(symbol));
        let gap = self.gap_node()?;
        let (seq, final_gap, tistis) = self.terminated_run("tall5dSeq", Self::parse_expr)?;
        self.builder
            .node(rule_index(rule), vec![rune, gap, seq, final_gap, tistis])
    }

    fn jogging1(
        &mut self,
        symbol: &str,
        rule: &str,
        jog_rule: &str,
        seq_rule: &str,
    ) -> Result<NodeId, LintError> {
        let rune = self.two_byte_lexeme(symbol_index(symbol));
        let gap1 = self.gap_node()?;
        let head = self.parse_expr()?;
        let gap2 = self.gap_node()?;
        let (seq, gap3, tistis) =
            self.terminated_run(seq_rule, |parser| parser.parse_jog(jog_rule))?;
        self.builder.node(
            rule_index(rule),
            vec![rune, gap1, head, gap2, seq, gap3, tistis],
        )
    }

    fn jogging2(&mut self, symbol: &str, rule: &str) -> Result<NodeId, LintError> {
        let rune = self.two_byte_lexeme(symbol_index(symbol));
        let gap1 = self.gap_node()?;
        let head = self.parse_expr()?;
        let gap2 = self.gap_node()?;
        let subhead = self.parse_expr()?;
        let gap3 = self.gap_node()?;
        let (seq, gap4, tistis) =
            self.terminated_run("ruck5d", |parser| parser.parse_jog("ruck5dJog"))?;
        self.builder.node(
            rule_index(rule),
            vec![rune, gap1, head, gap2, subhead, gap3, seq, gap4, tistis],
        )
    }

    fn prefix_jogging(&mut self, symbol: &str, rule: &str) -> Result<NodeId, LintError> {
        let rune = self.two_byte_lexeme(symbol_index(symbol));
        let gap1 = self.gap_node()?;
        let (seq, gap2, tistis) =
            self.terminated_run("rick5d", |parser| parser.parse_jog("rick5dJog"))?;
        let gap3 = self.gap_node()?;
        let tail = self.parse_expr()?;
        self.builder.node(
            rule_index(rule),
            vec![rune, gap1, seq, gap2, tistis, gap3, tail],
        )
    }
}

/// Parses a fixture snippet, panicking on malformed input.
pub fn parse_fixture(text: &str) -> (Source, Tree) {
    let frontend = fixture();
    let tree = frontend
        .parse(Path::new("fixture"), text)
        .expect("fixture source parses");
    (Source::new(text), tree)
}

/// The first node applying the named rule, in preorder.
pub fn find_rule_node(tree: &Tree, catalog: &Catalog, lhs: &str) -> Option<NodeId> {
    fn visit(tree: &Tree, catalog: &Catalog, node: NodeId, lhs: &str) -> Option<NodeId> {
        if let Some(rule) = tree.rule(node) {
            if catalog.lhs_name(rule) == lhs {
                return Some(node);
            }
        }
        tree.children(node)
            .iter()
            .find_map(|&child| visit(tree, catalog, child, lhs))
    }
    visit(tree, catalog, tree.root(), lhs)
}

/// Lints a fixture snippet with no filters and returns the diagnostics.
pub fn lint_source(text: &str) -> Result<Vec<Diagnostic>, LintError> {
    let frontend = fixture();
    let source = Source::new(text);
    let tree = frontend.parse(Path::new("fixture"), text)?;
    let mut reporter = Reporter::new("fixture", None, FilterList::default(), false);
    Linter::new(&source, &tree, frontend.catalog()).lint(&mut reporter)?;
    reporter.finish();
    Ok(reporter.diagnostics().to_vec())
}

/// Asserts a fixture snippet lints clean.
pub fn expect_clean(text: &str) {
    let diagnostics = lint_source(text).expect("fixture source lints");
    assert!(
        diagnostics.is_empty(),
        "expected clean source, got: {diagnostics:?}"
    );
}

/// Asserts some diagnostic description contains the given fragment.
pub fn expect_mistake(text: &str, fragment: &str) {
    let diagnostics = lint_source(text).expect("fixture source lints");
    assert!(
        diagnostics.iter().any(|d| d.description.contains(fragment)),
        "no diagnostic containing {fragment:?} in: {diagnostics:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_fixture_parser_tracks_spans() {
        let (source, tree) = parse_fixture("?-  x\n  %a  1\n==\n");
        let root = tree.root();
        assert_eq!(tree.start(root), 0);
        // the tree covers everything up to the closing terminator
        assert_eq!(tree.end(root), source.len() - 1);
        let catalog = fixture().catalog;
        let jog = find_rule_node(&tree, &catalog, "ruck5dJog").expect("jog");
        assert_eq!(source.line_column(tree.start(jog)).line(), 2);
        assert_eq!(source.line_column(tree.start(jog)).column(), 2);
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        let frontend = fixture();
        assert!(frontend.parse(Path::new("f"), "?-").is_err());
        assert!(frontend.parse(Path::new("f"), "%").is_err());
        assert!(frontend.parse(Path::new("f"), "a  b").is_err());
        assert!(frontend.parse(Path::new("f"), "==").is_err());
    }

    #[test]
    fn terms_names_and_numbers_lex() {
        let (_, tree) = parse_fixture("?-  some-name\n  %term42  137\n==\n");
        assert!(tree.node_count() > 5);
    }

    #[test]
    fn an_empty_running_parses_to_a_null_sequence() {
        use crate::syntax::NodeKind;

        let (source, tree) = parse_fixture("?|\n==\n");
        let null = tree
            .ids()
            .find(|&id| matches!(tree.kind(id), NodeKind::Null { .. }))
            .expect("null placeholder");
        assert_eq!(tree.length(null), 0);
        assert_eq!(source.line_column(tree.start(null)).line(), 2);
    }
}
