//! Construction-time grammar validation.
//!
//! Earley parsing accepts any context-free grammar, so validation only
//! rules out grammars that cannot mean anything: productions referencing
//! non-terminals that have no productions, and a start symbol nothing can
//! derive.

use super::{Production, ProductionId, Symbol};
use crate::error::GrammarError;
use crate::intern::{Interner, NtName};
use smallvec::SmallVec;

type Map<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;

pub(crate) fn check(
    productions: &[Production],
    by_lhs: &Map<NtName, SmallVec<[ProductionId; 4]>>,
    interner: &Interner,
    start: NtName,
) -> Result<(), GrammarError> {
    if by_lhs.get(&start).is_none_or(SmallVec::is_empty) {
        return Err(GrammarError::NoStartProduction {
            name: interner.resolve(start).to_string(),
        });
    }

    for production in productions {
        for sym in &production.rhs {
            if let Symbol::NonTerminal(name) = sym {
                if !by_lhs.contains_key(name) {
                    return Err(GrammarError::UndefinedNonTerminal {
                        lhs: interner.resolve(production.lhs).to_string(),
                        name: interner.resolve(*name).to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}
