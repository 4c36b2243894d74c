//! # Disambiguation Rules
//!
//! A grammar carries a [`Ruleset`]: declarative filters that prune the
//! parse forest after it is built. Five rule families are supported:
//!
//! - **Priority**: a DAG over productions. An alternative is discarded
//!   when a direct child was produced by a production transitively below
//!   its parent's production.
//! - **Associativity**: per production or per equal-priority group.
//!   `left` forbids the production as its own rightmost child, `right`
//!   forbids it as its own leftmost child, `none` forbids it as any
//!   child.
//! - **Reject**: literal strings or regexes; a node whose yield matches is
//!   discarded entirely.
//! - **Follow restriction**: regexes matched against the input right
//!   after a node's span; a match discards the node. Keyed by
//!   non-terminal, or (rarely) by a node's literal yield.
//! - **Prefer / avoid**: select among competing completions of the same
//!   non-terminal over the same span.
//!
//! Rules are declared through [`GrammarBuilder`](crate::grammar::GrammarBuilder)
//! and resolved when the grammar is built; the pruning pass in
//! [`forest`](crate::forest) consults the sealed ruleset.

use crate::error::GrammarError;
use crate::grammar::ProductionId;
use crate::intern::NtName;
use compact_str::CompactString;
use regex::Regex;

type Map<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;
type Set<T> = hashbrown::HashSet<T, ahash::RandomState>;

/// Operator associativity for a production or a production group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// A pattern that discards derivations of a non-terminal by their yield.
#[derive(Debug, Clone)]
pub enum RejectPattern {
    /// Matches when the yield equals the literal.
    Literal(CompactString),
    /// Matches when the regex fully matches the yield.
    Regex(Regex),
}

impl RejectPattern {
    /// Build a literal reject pattern.
    pub fn literal(text: &str) -> Self {
        Self::Literal(CompactString::from(text))
    }

    /// Compile a full-match reject regex.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidPattern`] when the regex does not
    /// compile.
    pub fn regex(pattern: &str) -> Result<Self, GrammarError> {
        let anchored = format!("^(?:{pattern})$");
        let regex = Regex::new(&anchored).map_err(|source| GrammarError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::Regex(regex))
    }

    pub(crate) fn matches(&self, yield_text: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == yield_text,
            Self::Regex(regex) => regex.is_match(yield_text),
        }
    }
}

/// Compile a follow-restriction regex, anchored to the start of the
/// remaining input.
pub(crate) fn compile_follow(pattern: &str) -> Result<Regex, GrammarError> {
    let anchored = format!("^(?:{pattern})");
    Regex::new(&anchored).map_err(|source| GrammarError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// The sealed disambiguation rule bundle carried by a grammar.
///
/// Empty by default; every field is filled in from builder declarations
/// and frozen together with the grammar.
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    /// Raw priority edges `higher ▷ lower`.
    pub(crate) edges: Vec<(ProductionId, ProductionId)>,
    /// Transitive closure of `edges`, computed by [`Ruleset::seal`].
    pub(crate) lower_than: Map<ProductionId, Set<ProductionId>>,
    pub(crate) assoc: Map<ProductionId, Associativity>,
    pub(crate) groups: Vec<(Associativity, Set<ProductionId>)>,
    pub(crate) reject: Map<NtName, Vec<RejectPattern>>,
    pub(crate) follow: Map<NtName, Vec<Regex>>,
    pub(crate) follow_literal: Vec<(CompactString, Vec<Regex>)>,
    pub(crate) prefer: Map<NtName, Set<ProductionId>>,
    pub(crate) avoid: Map<NtName, Set<ProductionId>>,
}

impl Ruleset {
    /// Whether no rule of any family is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
            && self.assoc.is_empty()
            && self.groups.is_empty()
            && self.reject.is_empty()
            && self.follow.is_empty()
            && self.follow_literal.is_empty()
            && self.prefer.is_empty()
            && self.avoid.is_empty()
    }

    /// Whether `child` is transitively below `parent` in the priority DAG.
    #[must_use]
    pub fn priority_beats(&self, parent: ProductionId, child: ProductionId) -> bool {
        self.lower_than
            .get(&parent)
            .is_some_and(|lower| lower.contains(&child))
    }

    /// Compute the transitive closure of the priority edges.
    pub(crate) fn seal(&mut self) {
        let mut adjacent: Map<ProductionId, Vec<ProductionId>> = Map::default();
        for &(higher, lower) in &self.edges {
            adjacent.entry(higher).or_default().push(lower);
        }
        let mut closure: Map<ProductionId, Set<ProductionId>> = Map::default();
        for (&start, direct) in &adjacent {
            let mut reachable = Set::default();
            let mut stack = direct.clone();
            while let Some(prod) = stack.pop() {
                if reachable.insert(prod) {
                    if let Some(next) = adjacent.get(&prod) {
                        stack.extend_from_slice(next);
                    }
                }
            }
            closure.insert(start, reachable);
        }
        self.lower_than = closure;
    }

    /// Priority and associativity check for one alternative of a node.
    ///
    /// `first_child` / `last_child` are the productions of the leftmost and
    /// rightmost children when those children are forest nodes (leaves
    /// carry no production and cannot violate associativity);
    /// `node_children` lists the productions of every node child in order.
    pub(crate) fn allows_alternative(
        &self,
        parent: ProductionId,
        first_child: Option<ProductionId>,
        last_child: Option<ProductionId>,
        node_children: &[ProductionId],
    ) -> bool {
        if let Some(lower) = self.lower_than.get(&parent) {
            if node_children.iter().any(|child| lower.contains(child)) {
                return false;
            }
        }

        if let Some(&assoc) = self.assoc.get(&parent) {
            let violated = match assoc {
                Associativity::Left => last_child == Some(parent),
                Associativity::Right => first_child == Some(parent),
                Associativity::None => node_children.contains(&parent),
            };
            if violated {
                return false;
            }
        }

        for (assoc, group) in &self.groups {
            if !group.contains(&parent) {
                continue;
            }
            let violated = match assoc {
                Associativity::Left => last_child.is_some_and(|child| group.contains(&child)),
                Associativity::Right => first_child.is_some_and(|child| group.contains(&child)),
                Associativity::None => node_children.iter().any(|child| group.contains(child)),
            };
            if violated {
                return false;
            }
        }

        true
    }

    /// Whether a node with the given lhs and yield is rejected outright.
    pub(crate) fn rejects(&self, lhs: NtName, yield_text: &str) -> bool {
        self.reject
            .get(&lhs)
            .is_some_and(|patterns| patterns.iter().any(|p| p.matches(yield_text)))
    }

    /// Whether a follow restriction fires for a node with the given lhs
    /// and yield, given the input remaining after the node's span.
    pub(crate) fn follow_violated(&self, lhs: NtName, yield_text: &str, rest: &str) -> bool {
        if let Some(regexes) = self.follow.get(&lhs) {
            if regexes.iter().any(|re| re.is_match(rest)) {
                return true;
            }
        }
        self.follow_literal
            .iter()
            .any(|(literal, regexes)| {
                literal == yield_text && regexes.iter().any(|re| re.is_match(rest))
            })
    }

    pub(crate) fn prefer_of(&self, lhs: NtName) -> Option<&Set<ProductionId>> {
        self.prefer.get(&lhs)
    }

    pub(crate) fn avoid_of(&self, lhs: NtName) -> Option<&Set<ProductionId>> {
        self.avoid.get(&lhs)
    }
}
