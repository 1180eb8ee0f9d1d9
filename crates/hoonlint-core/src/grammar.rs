use std::sync::LazyLock;

use regex::Regex;

use crate::classify::{is_tall_rune_name, Classifier, Shape};
use crate::error::LintError;
use crate::internal;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub u32);

/// The grammar description the external parser must provide. Symbol and
/// rule ids must be dense, starting at zero.
pub trait GrammarSource {
    fn symbol_ids(&self) -> Vec<SymbolId>;
    fn symbol_name(&self, id: SymbolId) -> String;
    fn symbol_is_lexeme(&self, id: SymbolId) -> bool;
    fn rule_ids(&self) -> Vec<RuleId>;
    /// `(lhs, rhs)` of the production.
    fn rule_expand(&self, id: RuleId) -> (SymbolId, Vec<SymbolId>);
    /// The configured separator symbol of a sequence rule, if any.
    fn rule_separator(&self, id: RuleId) -> Option<SymbolId>;
}

/// Rune-named gap terminals: `BARCABGAP`, `WUTHEPGAP`, ...
static RUNE_GAP_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[A-Z][AEIOU][A-Z][A-Z][AEIOU][A-Z]GAP$").expect("static pattern")
});

fn is_gap_name(name: &str) -> bool {
    name == "GAP" || RUNE_GAP_NAME.is_match(name)
}

#[derive(Debug)]
pub struct Symbol {
    pub name: String,
    pub is_lexeme: bool,
    pub is_gap: bool,
}

#[derive(Debug)]
pub struct Rule {
    pub lhs: SymbolId,
    pub rhs: Vec<SymbolId>,
    pub separator: Option<SymbolId>,
    /// Count of gap-bearing RHS symbols; −1 for gap-separated sequences.
    pub gapiness: i32,
}

/// Symbol and rule metadata plus the per-rule shape map, built once from
/// the grammar and immutable thereafter.
#[derive(Debug)]
pub struct Catalog {
    symbols: Vec<Symbol>,
    rules: Vec<Rule>,
    shapes: Vec<Shape>,
    tall_rune: Vec<bool>,
    mortar: Vec<bool>,
    classifier: Classifier,
}

impl Catalog {
    pub fn from_grammar(grammar: &dyn GrammarSource) -> Result<Self, LintError> {
        Self::with_classifier(grammar, Classifier::default())
    }

    pub fn with_classifier(
        grammar: &dyn GrammarSource,
        classifier: Classifier,
    ) -> Result<Self, LintError> {
        let mut symbol_ids = grammar.symbol_ids();
        symbol_ids.sort();
        for (ix, id) in symbol_ids.iter().enumerate() {
            if id.0 as usize != ix {
                return Err(internal!("symbol ids are not dense at {:?}", id));
            }
        }
        let symbols: Vec<Symbol> = symbol_ids
            .iter()
            .map(|&id| {
                let name = grammar.symbol_name(id);
                Symbol {
                    is_lexeme: grammar.symbol_is_lexeme(id),
                    is_gap: is_gap_name(&name),
                    name,
                }
            })
            .collect();

        let mut rule_ids = grammar.rule_ids();
        rule_ids.sort();
        for (ix, id) in rule_ids.iter().enumerate() {
            if id.0 as usize != ix {
                return Err(internal!("rule ids are not dense at {:?}", id));
            }
        }
        let mut rules = Vec::with_capacity(rule_ids.len());
        for &id in &rule_ids {
            let (lhs, rhs) = grammar.rule_expand(id);
            let separator = grammar.rule_separator(id);
            for sym in rhs.iter().chain(&[lhs]).chain(separator.iter()) {
                if sym.0 as usize >= symbols.len() {
                    return Err(internal!("rule {:?} references unknown symbol {:?}", id, sym));
                }
            }
            let gapiness = match separator {
                Some(sep) if symbols[sep.0 as usize].is_gap => -1,
                _ => rhs
                    .iter()
                    .filter(|sym| symbols[sym.0 as usize].is_gap)
                    .count() as i32,
            };
            rules.push(Rule {
                lhs,
                rhs,
                separator,
                gapiness,
            });
        }

        let shapes = rules
            .iter()
            .map(|rule| classifier.classify(&symbols[rule.lhs.0 as usize].name, rule.gapiness))
            .collect();
        let tall_rune = rules
            .iter()
            .map(|rule| is_tall_rune_name(&symbols[rule.lhs.0 as usize].name))
            .collect();
        let mortar = rules
            .iter()
            .map(|rule| classifier.is_mortar(&symbols[rule.lhs.0 as usize].name))
            .collect();

        Ok(Catalog {
            symbols,
            rules,
            shapes,
            tall_rune,
            mortar,
            classifier,
        })
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.0 as usize]
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn lhs_name(&self, id: RuleId) -> &str {
        &self.symbol(self.rule(id).lhs).name
    }

    pub fn shape(&self, id: RuleId) -> Shape {
        self.shapes[id.0 as usize]
    }

    /// The shape of `id`, honoring any per-parent note override.
    pub fn shape_for(&self, id: RuleId, parent: Option<&str>) -> Shape {
        let shape = self.shape(id);
        if shape == Shape::TallNote {
            if let Some(parent) = parent {
                if let Some(overridden) = self.classifier.note_override(self.lhs_name(id), parent) {
                    return overridden;
                }
            }
        }
        shape
    }

    /// Does the LHS name match the tall-rune pattern (notes included)?
    pub fn is_tall_rune(&self, id: RuleId) -> bool {
        self.tall_rune[id.0 as usize]
    }

    pub fn is_mortar(&self, id: RuleId) -> bool {
        self.mortar[id.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_grammar;

    #[test]
    fn gap_names() {
        assert!(is_gap_name("GAP"));
        assert!(is_gap_name("BARCABGAP"));
        assert!(is_gap_name("WUTHEPGAP"));
        assert!(!is_gap_name("GAPGAP"));
        assert!(!is_gap_name("BRCABGAP"));
        assert!(!is_gap_name("barcabGAP"));
        assert!(!is_gap_name("TISTIS"));
    }

    struct SparseGrammar;

    impl GrammarSource for SparseGrammar {
        fn symbol_ids(&self) -> Vec<SymbolId> {
            vec![SymbolId(0), SymbolId(2)]
        }
        fn symbol_name(&self, id: SymbolId) -> String {
            format!("S{}", id.0)
        }
        fn symbol_is_lexeme(&self, _id: SymbolId) -> bool {
            true
        }
        fn rule_ids(&self) -> Vec<RuleId> {
            Vec::new()
        }
        fn rule_expand(&self, _id: RuleId) -> (SymbolId, Vec<SymbolId>) {
            unreachable!("no rules")
        }
        fn rule_separator(&self, _id: RuleId) -> Option<SymbolId> {
            None
        }
    }

    #[test]
    fn sparse_symbol_ids_are_rejected() {
        let err = Catalog::from_grammar(&SparseGrammar).unwrap_err();
        assert!(err.to_string().contains("not dense"));
    }

    #[test]
    fn catalog_builds_from_fixture_grammar() {
        let grammar = fixture_grammar();
        let catalog = Catalog::from_grammar(&grammar).expect("catalog");
        assert_eq!(catalog.symbol_count(), grammar.symbol_ids().len());
        assert_eq!(catalog.rule_count(), grammar.rule_ids().len());
    }

    #[test]
    fn gapiness_counts_gaps_and_marks_sequences() {
        let grammar = fixture_grammar();
        let catalog = Catalog::from_grammar(&grammar).expect("catalog");
        for id in 0..catalog.rule_count() {
            let id = RuleId(id as u32);
            let rule = catalog.rule(id);
            match catalog.lhs_name(id) {
                "tallWuthep" | "tallCentis" => assert_eq!(rule.gapiness, 3),
                "tallWutbar" | "tallWutpam" => assert_eq!(rule.gapiness, 2),
                "rick5d" | "ruck5d" | "tall5dSeq" => assert_eq!(rule.gapiness, -1),
                "ruck5dJog" | "rick5dJog" => assert_eq!(rule.gapiness, 1),
                _ => {}
            }
        }
    }

    #[test]
    fn shape_map_is_precomputed() {
        let grammar = fixture_grammar();
        let catalog = Catalog::from_grammar(&grammar).expect("catalog");
        for id in 0..catalog.rule_count() {
            let id = RuleId(id as u32);
            let shape = catalog.shape(id);
            match catalog.lhs_name(id) {
                "tallWuthep" => assert_eq!(shape, Shape::Jogging1),
                "tallTiscol" => assert_eq!(shape, Shape::PrefixJogging),
                "tallKethep" => assert_eq!(shape, Shape::TallNote),
                "rick5d" => assert_eq!(shape, Shape::Sequence),
                "tallWutcol" => assert_eq!(shape, Shape::TallBody),
                _ => {}
            }
        }
    }

    #[test]
    fn notes_still_count_as_tall_runes() {
        let grammar = fixture_grammar();
        let catalog = Catalog::from_grammar(&grammar).expect("catalog");
        for id in 0..catalog.rule_count() {
            let id = RuleId(id as u32);
            if catalog.lhs_name(id) == "tallKethep" {
                assert!(catalog.is_tall_rune(id));
                assert_eq!(catalog.shape(id), Shape::TallNote);
            }
        }
    }
}
