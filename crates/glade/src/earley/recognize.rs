//! The recognizer loop: scanner, predictor and completer over a worklist.

use super::chart::{Chart, Item};
use crate::grammar::{Grammar, Symbol};

/// Run the Earley recognizer over the input, returning the filled chart
/// and whether the input is in the grammar's language.
///
/// Each item set is drained FIFO; items appended during the drain are
/// processed in the same pass, so every item is handled exactly once.
/// Nullable non-terminals are folded into the predictor: predicting a
/// nullable `B` also advances the predicting item past `B` immediately,
/// which makes ε-derivations work without a separate completion pass.
pub fn recognize(grammar: &Grammar, input: &[char]) -> (Chart, bool) {
    let n = input.len();
    let mut chart = Chart::new(n);

    for &prod in grammar.productions_of(grammar.start()) {
        chart.push(0, Item::new(prod, 0, 0));
    }

    for i in 0..=n {
        let mut cursor = 0;
        while cursor < chart.set(i).len() {
            let item = chart.set(i).item(cursor);
            cursor += 1;

            match item.next_symbol(grammar) {
                // Scanner
                Some(sym @ (Symbol::Terminal(_) | Symbol::Wildcard)) => {
                    if i < n && sym.matches(input[i]) {
                        chart.push(i + 1, item.advanced());
                    }
                }
                // Predictor
                Some(Symbol::NonTerminal(name)) => {
                    for &prod in grammar.productions_of(name) {
                        chart.push(i, Item::new(prod, 0, i));
                    }
                    if grammar.is_nullable(name) {
                        chart.push(i, item.advanced());
                    }
                }
                // Completer
                None => {
                    let lhs = grammar.production(item.prod).lhs;
                    let waiting: Vec<Item> = chart
                        .items(item.origin)
                        .iter()
                        .copied()
                        .filter(|candidate| {
                            matches!(
                                candidate.next_symbol(grammar),
                                Some(Symbol::NonTerminal(name)) if name == lhs
                            )
                        })
                        .collect();
                    for candidate in waiting {
                        chart.push(i, candidate.advanced());
                    }
                }
            }
        }
    }

    let accepted = chart.items(n).iter().any(|item| {
        item.origin == 0
            && item.is_complete(grammar)
            && grammar.production(item.prod).lhs == grammar.start()
    });

    (chart, accepted)
}
