//! Nullable-set computation.
//!
//! A non-terminal is nullable when it can derive the empty string. The set
//! is the least fixed point of "some production's right-hand side is
//! entirely nullable", seeded by ε-productions, and is computed once per
//! grammar build.

use super::{Production, Symbol};
use crate::intern::NtName;
use std::collections::VecDeque;

type Map<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;
type Set<T> = hashbrown::HashSet<T, ahash::RandomState>;

/// Compute the nullable set with a reverse-dependency worklist: when a
/// non-terminal turns nullable, only productions mentioning it are
/// re-examined.
pub(crate) fn nullable_set(productions: &[Production]) -> Set<NtName> {
    let mut mentioned_in: Map<NtName, Vec<usize>> = Map::default();
    let mut nullable = Set::default();
    let mut queue = VecDeque::new();

    for (idx, production) in productions.iter().enumerate() {
        if production.is_epsilon() && nullable.insert(production.lhs) {
            queue.push_back(production.lhs);
        }
        for sym in &production.rhs {
            if let Symbol::NonTerminal(name) = sym {
                mentioned_in.entry(*name).or_default().push(idx);
            }
        }
    }

    while let Some(name) = queue.pop_front() {
        let Some(candidates) = mentioned_in.get(&name) else {
            continue;
        };
        for &idx in candidates {
            let production = &productions[idx];
            if nullable.contains(&production.lhs) {
                continue;
            }
            let all_nullable = production
                .rhs
                .iter()
                .all(|sym| matches!(sym, Symbol::NonTerminal(name) if nullable.contains(name)));
            if all_nullable {
                nullable.insert(production.lhs);
                queue.push_back(production.lhs);
            }
        }
    }

    nullable
}
