//! # Parser Facade
//!
//! [`Parser`] ties the pieces together: it owns a shared [`Grammar`] and
//! runs recognize → forest build → rule pruning per input. The grammar is
//! validated when it is built, so constructing a parser cannot fail.

use crate::earley;
use crate::forest::Forest;
use crate::grammar::Grammar;
use std::sync::Arc;

/// A parser for one grammar. Cheap to clone; the grammar is shared.
#[derive(Debug, Clone)]
pub struct Parser {
    grammar: Arc<Grammar>,
}

impl Parser {
    /// Build a parser from a validated grammar.
    #[must_use]
    pub fn new(grammar: Grammar) -> Self {
        Self {
            grammar: Arc::new(grammar),
        }
    }

    /// The grammar this parser runs.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Decide membership of the input in the grammar's language.
    #[must_use]
    pub fn recognize(&self, input: &str) -> bool {
        let chars: Vec<char> = input.chars().collect();
        earley::recognize(&self.grammar, &chars).1
    }

    /// Run the recognizer and return the filled chart, for inspection.
    #[must_use]
    pub fn chart(&self, input: &str) -> earley::Chart {
        let chars: Vec<char> = input.chars().collect();
        earley::recognize(&self.grammar, &chars).0
    }

    /// Parse the input into a pruned forest of every surviving
    /// derivation. An unrecognized input yields an empty forest, not an
    /// error.
    #[must_use]
    pub fn parse(&self, input: &str) -> Forest {
        let chars: Vec<char> = input.chars().collect();
        let (chart, accepted) = earley::recognize(&self.grammar, &chars);
        if accepted {
            Forest::build(Arc::clone(&self.grammar), chars, &chart)
        } else {
            Forest::empty(Arc::clone(&self.grammar), chars)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarBuilder, nt, t};

    fn parser() -> Parser {
        let mut builder = GrammarBuilder::new();
        builder.production("S", [t('a'), nt("S")]);
        builder.production("S", [t('b')]);
        builder.start("S");
        Parser::new(builder.build().unwrap())
    }

    #[test]
    fn recognize_and_parse_agree() {
        let parser = parser();
        assert!(parser.recognize("aab"));
        assert_eq!(parser.parse("aab").count(), 1);

        assert!(!parser.recognize("aba"));
        let forest = parser.parse("aba");
        assert!(forest.is_empty());
        assert_eq!(forest.count(), 0);
    }

    #[test]
    fn parser_is_cheaply_cloneable() {
        let parser = parser();
        let clone = parser.clone();
        assert!(clone.recognize("b"));
        assert!(parser.recognize("b"));
    }

    #[test]
    fn chart_is_inspectable() {
        let parser = parser();
        let chart = parser.chart("ab");
        assert_eq!(chart.len(), 3);
        assert!(!chart.items(0).is_empty());
    }
}
