//! Brute-force language enumeration.
//!
//! [`sentences`] computes, from first principles, every string of length
//! up to a bound that a grammar derives. It is a monotone fixed point
//! over per-non-terminal string sets, so it is sound and complete up to
//! the bound regardless of recursion shape. Intended as an oracle for
//! small grammars; the state space is every derivable string up to the
//! bound.

use crate::grammar::{Grammar, Symbol};
use crate::intern::NtName;

type Map<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;
type Set<T> = hashbrown::HashSet<T, ahash::RandomState>;

/// Every string of at most `max_len` characters in the grammar's
/// language.
///
/// # Panics
///
/// Panics if the grammar contains the wildcard symbol; a wildcard's
/// language depends on the input alphabet, which an oracle cannot
/// enumerate.
#[must_use]
pub fn sentences(grammar: &Grammar, max_len: usize) -> Set<String> {
    let mut languages: Map<NtName, Set<String>> = Map::default();
    for (_, production) in grammar.productions() {
        languages.entry(production.lhs).or_default();
    }

    loop {
        let mut changed = false;
        for (_, production) in grammar.productions() {
            let derived = concatenations(grammar, &languages, production.rhs.as_slice(), max_len);
            let entry = languages
                .get_mut(&production.lhs)
                .expect("every lhs was seeded");
            for sentence in derived {
                if entry.insert(sentence) {
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    languages.remove(&grammar.start()).unwrap_or_default()
}

/// All concatenations of current per-symbol languages along `rhs`, capped
/// at `max_len` characters. The empty `rhs` yields exactly the empty
/// string.
fn concatenations(
    grammar: &Grammar,
    languages: &Map<NtName, Set<String>>,
    rhs: &[Symbol],
    max_len: usize,
) -> Vec<String> {
    // (text, char count) pairs; counting chars keeps the cap correct for
    // non-ASCII terminals.
    let mut partials: Vec<(String, usize)> = vec![(String::new(), 0)];

    for sym in rhs {
        let mut extended = Vec::new();
        match sym {
            Symbol::Terminal(ch) => {
                for (text, count) in &partials {
                    if count + 1 <= max_len {
                        let mut next = text.clone();
                        next.push(*ch);
                        extended.push((next, count + 1));
                    }
                }
            }
            Symbol::Wildcard => {
                panic!("wildcard grammars are not supported by the sentence oracle");
            }
            Symbol::NonTerminal(name) => {
                let known = languages
                    .get(name)
                    .unwrap_or_else(|| panic!("unseeded non-terminal `{}`", grammar.name(*name)));
                for (text, count) in &partials {
                    for option in known {
                        let option_count = option.chars().count();
                        if count + option_count <= max_len {
                            let mut next = text.clone();
                            next.push_str(option);
                            extended.push((next, count + option_count));
                        }
                    }
                }
            }
        }
        partials = extended;
    }

    partials.into_iter().map(|(text, _)| text).collect()
}
