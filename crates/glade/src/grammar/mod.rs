//! # Grammar Model
//!
//! BNF-normalized grammars: flat productions over single-character
//! terminals, a wildcard terminal matching any one character, and interned
//! non-terminals.
//!
//! A grammar is assembled mutably through [`GrammarBuilder`] and frozen by
//! [`GrammarBuilder::build`], which validates references, computes the
//! nullable set and seals the disambiguation [`Ruleset`]. The frozen
//! [`Grammar`] is immutable and can be shared between parses.
//!
//! ```
//! use glade::grammar::{GrammarBuilder, nt, t};
//!
//! let mut builder = GrammarBuilder::new();
//! builder.production("S", [t('a'), nt("S")]);
//! builder.production("S", [t('b')]);
//! builder.start("S");
//! let grammar = builder.build().unwrap();
//! assert_eq!(grammar.name(grammar.start()), "S");
//! ```

pub mod analysis;
pub mod validate;

use crate::disambiguation::{Associativity, RejectPattern, Ruleset, compile_follow};
use crate::error::{GrammarError, RuleWarning};
use crate::intern::{Interner, NtName};
use compact_str::CompactString;
use smallvec::SmallVec;
use std::fmt;

type Map<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;
type Set<T> = hashbrown::HashSet<T, ahash::RandomState>;

/// A grammar symbol: one terminal character, the wildcard, or a
/// non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    Terminal(char),
    /// Matches any single input character.
    Wildcard,
    NonTerminal(NtName),
}

impl Symbol {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal(_) | Self::Wildcard)
    }

    #[must_use]
    pub const fn is_non_terminal(self) -> bool {
        matches!(self, Self::NonTerminal(_))
    }

    /// Whether this symbol, as a terminal, matches the input character.
    /// Non-terminals match nothing.
    #[must_use]
    pub fn matches(self, ch: char) -> bool {
        match self {
            Self::Terminal(t) => t == ch,
            Self::Wildcard => true,
            Self::NonTerminal(_) => false,
        }
    }
}

/// Builder-side symbol, before non-terminal names are interned.
///
/// Constructed with [`t`], [`nt`] and [`any`]; resolved to [`Symbol`] when
/// handed to [`GrammarBuilder::production`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sym {
    Terminal(char),
    Wildcard,
    NonTerminal(CompactString),
}

/// A terminal character symbol.
#[must_use]
pub const fn t(ch: char) -> Sym {
    Sym::Terminal(ch)
}

/// A non-terminal symbol by name.
#[must_use]
pub fn nt(name: &str) -> Sym {
    Sym::NonTerminal(CompactString::from(name))
}

/// The wildcard symbol, matching any one input character.
#[must_use]
pub const fn any() -> Sym {
    Sym::Wildcard
}

/// Identifier of an interned production. Dense per grammar; identity
/// checks are integer comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductionId(u32);

impl ProductionId {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One production `lhs -> rhs`. An empty `rhs` derives the empty string.
///
/// Productions are content-addressable: inserting the same `(lhs, rhs)`
/// twice through the builder yields the same [`ProductionId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub lhs: NtName,
    pub rhs: SmallVec<[Symbol; 4]>,
}

impl Production {
    /// Whether this is an ε-production.
    #[must_use]
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}

/// A frozen, validated grammar.
///
/// Holds the production table, the start symbol, the memoized nullable
/// set, the disambiguation ruleset and any warnings collected while rules
/// were resolved. Read-only during parsing.
#[derive(Debug, Clone)]
pub struct Grammar {
    interner: Interner,
    productions: Vec<Production>,
    by_lhs: Map<NtName, SmallVec<[ProductionId; 4]>>,
    start: NtName,
    nullable: Set<NtName>,
    rules: Ruleset,
    warnings: Vec<RuleWarning>,
}

impl Grammar {
    /// The designated start symbol.
    #[must_use]
    pub const fn start(&self) -> NtName {
        self.start
    }

    /// The production behind an id.
    ///
    /// # Panics
    ///
    /// Panics if the id comes from a different grammar.
    #[must_use]
    pub fn production(&self, id: ProductionId) -> &Production {
        &self.productions[id.index()]
    }

    /// All productions with their ids, in declaration order.
    pub fn productions(&self) -> impl Iterator<Item = (ProductionId, &Production)> {
        self.productions
            .iter()
            .enumerate()
            .map(|(idx, prod)| (ProductionId::new(idx as u32), prod))
    }

    /// The productions of a non-terminal, in declaration order.
    #[must_use]
    pub fn productions_of(&self, lhs: NtName) -> &[ProductionId] {
        self.by_lhs.get(&lhs).map_or(&[], SmallVec::as_slice)
    }

    /// Whether a non-terminal can derive the empty string.
    #[must_use]
    pub fn is_nullable(&self, name: NtName) -> bool {
        self.nullable.contains(&name)
    }

    /// The full nullable set.
    #[must_use]
    pub fn nullable_set(&self) -> &Set<NtName> {
        &self.nullable
    }

    /// Resolve an interned non-terminal back to its name.
    #[must_use]
    pub fn name(&self, name: NtName) -> &str {
        self.interner.resolve(name)
    }

    /// Look up a non-terminal by name.
    #[must_use]
    pub fn non_terminal(&self, name: &str) -> Option<NtName> {
        self.interner
            .get(name)
            .filter(|key| self.by_lhs.contains_key(key))
    }

    /// The disambiguation rules travelling with this grammar.
    #[must_use]
    pub const fn rules(&self) -> &Ruleset {
        &self.rules
    }

    /// Warnings collected while disambiguation rules were resolved.
    #[must_use]
    pub fn warnings(&self) -> &[RuleWarning] {
        &self.warnings
    }

    /// Render a production as `Lhs -> sym sym ...` for debugging.
    #[must_use]
    pub fn display_production(&self, id: ProductionId) -> String {
        use fmt::Write as _;
        let prod = self.production(id);
        let mut out = String::new();
        let _ = write!(out, "{} ->", self.name(prod.lhs));
        if prod.is_epsilon() {
            out.push_str(" ε");
        }
        for sym in &prod.rhs {
            match sym {
                Symbol::Terminal(ch) => {
                    let _ = write!(out, " '{ch}'");
                }
                Symbol::Wildcard => out.push_str(" ·"),
                Symbol::NonTerminal(name) => {
                    let _ = write!(out, " {}", self.name(*name));
                }
            }
        }
        out
    }
}

/// Mutable grammar assembly.
///
/// Productions are declared with [`production`](Self::production), which
/// returns the interned [`ProductionId`] used to reference the production
/// in priority, associativity and prefer/avoid declarations.
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    interner: Interner,
    productions: Vec<Production>,
    dedup: Map<Production, ProductionId>,
    by_lhs: Map<NtName, SmallVec<[ProductionId; 4]>>,
    start: Option<NtName>,
    priority: Vec<(ProductionId, ProductionId)>,
    assoc: Vec<(ProductionId, Associativity)>,
    groups: Vec<(Associativity, Vec<ProductionId>)>,
    rejects: Vec<(CompactString, RejectPattern)>,
    follows: Vec<(CompactString, regex::Regex)>,
    follow_literals: Vec<(CompactString, regex::Regex)>,
    prefers: Vec<ProductionId>,
    avoids: Vec<ProductionId>,
    warnings: Vec<RuleWarning>,
}

impl GrammarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a production. Re-declaring the same `(lhs, rhs)` returns
    /// the existing id.
    pub fn production(
        &mut self,
        lhs: &str,
        rhs: impl IntoIterator<Item = Sym>,
    ) -> ProductionId {
        let lhs = self.interner.intern(lhs);
        let rhs: SmallVec<[Symbol; 4]> = rhs
            .into_iter()
            .map(|sym| match sym {
                Sym::Terminal(ch) => Symbol::Terminal(ch),
                Sym::Wildcard => Symbol::Wildcard,
                Sym::NonTerminal(name) => Symbol::NonTerminal(self.interner.intern(&name)),
            })
            .collect();
        let production = Production { lhs, rhs };

        if let Some(&id) = self.dedup.get(&production) {
            return id;
        }
        let id = ProductionId::new(self.productions.len() as u32);
        self.dedup.insert(production.clone(), id);
        self.by_lhs.entry(lhs).or_default().push(id);
        self.productions.push(production);
        id
    }

    /// Designate the start symbol.
    pub fn start(&mut self, name: &str) {
        self.start = Some(self.interner.intern(name));
    }

    /// Declare a priority edge: derivations where `lower` (or anything
    /// transitively below it) is a direct child of `higher` are pruned.
    pub fn priority(&mut self, higher: ProductionId, lower: ProductionId) {
        self.priority.push((higher, lower));
    }

    /// Make a production left-associative.
    pub fn left(&mut self, production: ProductionId) {
        self.assoc.push((production, Associativity::Left));
    }

    /// Make a production right-associative.
    pub fn right(&mut self, production: ProductionId) {
        self.assoc.push((production, Associativity::Right));
    }

    /// Make a production non-associative.
    pub fn non_assoc(&mut self, production: ProductionId) {
        self.assoc.push((production, Associativity::None));
    }

    /// Declare an equal-priority associativity group.
    pub fn group(
        &mut self,
        assoc: Associativity,
        members: impl IntoIterator<Item = ProductionId>,
    ) {
        self.groups.push((assoc, members.into_iter().collect()));
    }

    /// Reject derivations of `name` whose yield matches the pattern.
    pub fn reject(&mut self, name: &str, pattern: RejectPattern) {
        self.rejects.push((CompactString::from(name), pattern));
    }

    /// Reject derivations of `name` whose yield equals the literal.
    pub fn reject_literal(&mut self, name: &str, literal: &str) {
        self.reject(name, RejectPattern::literal(literal));
    }

    /// Reject derivations of `name` whose yield fully matches the regex.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidPattern`] when the regex does not
    /// compile.
    pub fn reject_regex(&mut self, name: &str, pattern: &str) -> Result<(), GrammarError> {
        let pattern = RejectPattern::regex(pattern)?;
        self.reject(name, pattern);
        Ok(())
    }

    /// Reject derivations of `name` immediately followed in the input by
    /// a match of the regex.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidPattern`] when the regex does not
    /// compile.
    pub fn follow_restriction(&mut self, name: &str, pattern: &str) -> Result<(), GrammarError> {
        let regex = compile_follow(pattern)?;
        self.follows.push((CompactString::from(name), regex));
        Ok(())
    }

    /// Follow restriction keyed by a node's literal yield instead of its
    /// non-terminal. Rarely useful; declaring one records a
    /// [`RuleWarning::LiteralFollowRestriction`].
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidPattern`] when the regex does not
    /// compile.
    pub fn follow_restriction_literal(
        &mut self,
        literal: &str,
        pattern: &str,
    ) -> Result<(), GrammarError> {
        let regex = compile_follow(pattern)?;
        self.warnings.push(RuleWarning::LiteralFollowRestriction {
            literal: literal.to_string(),
        });
        self.follow_literals
            .push((CompactString::from(literal), regex));
        Ok(())
    }

    /// Among competing completions of the production's lhs over one span,
    /// keep only preferred productions (when any survive).
    pub fn prefer(&mut self, production: ProductionId) {
        self.prefers.push(production);
    }

    /// Among competing completions of the production's lhs over one span,
    /// drop avoided productions (when any survive).
    pub fn avoid(&mut self, production: ProductionId) {
        self.avoids.push(production);
    }

    /// Validate and freeze the grammar.
    ///
    /// Computes the nullable set, resolves rule declarations (rules
    /// naming unknown non-terminals degrade to warnings) and seals the
    /// priority closure.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] when no start symbol was declared, the
    /// start symbol has no production, or a production references a
    /// non-terminal without productions.
    pub fn build(mut self) -> Result<Grammar, GrammarError> {
        let start = self.start.ok_or(GrammarError::MissingStart)?;
        validate::check(&self.productions, &self.by_lhs, &self.interner, start)?;

        let nullable = analysis::nullable_set(&self.productions);
        let mut warnings = std::mem::take(&mut self.warnings);
        let rules = self.resolve_rules(&mut warnings);

        Ok(Grammar {
            interner: self.interner,
            productions: self.productions,
            by_lhs: self.by_lhs,
            start,
            nullable,
            rules,
            warnings,
        })
    }

    fn resolve_rules(&mut self, warnings: &mut Vec<RuleWarning>) -> Ruleset {
        let mut rules = Ruleset::default();
        rules.edges = std::mem::take(&mut self.priority);
        for (production, assoc) in self.assoc.drain(..) {
            rules.assoc.insert(production, assoc);
        }
        for (assoc, members) in self.groups.drain(..) {
            rules.groups.push((assoc, members.into_iter().collect()));
        }

        for (name, pattern) in self.rejects.drain(..) {
            match self.interner.get(&name).filter(|key| self.by_lhs.contains_key(key)) {
                Some(key) => rules.reject.entry(key).or_default().push(pattern),
                None => warnings.push(RuleWarning::UnknownNonTerminal {
                    name: name.to_string(),
                    rule: "reject",
                }),
            }
        }
        for (name, regex) in self.follows.drain(..) {
            match self.interner.get(&name).filter(|key| self.by_lhs.contains_key(key)) {
                Some(key) => rules.follow.entry(key).or_default().push(regex),
                None => warnings.push(RuleWarning::UnknownNonTerminal {
                    name: name.to_string(),
                    rule: "follow restriction",
                }),
            }
        }
        for (literal, regex) in self.follow_literals.drain(..) {
            match rules
                .follow_literal
                .iter_mut()
                .find(|(existing, _)| *existing == literal)
            {
                Some((_, regexes)) => regexes.push(regex),
                None => rules.follow_literal.push((literal, vec![regex])),
            }
        }

        for id in self.prefers.drain(..) {
            let lhs = self.productions[id.index()].lhs;
            rules.prefer.entry(lhs).or_default().insert(id);
        }
        for id in self.avoids.drain(..) {
            let lhs = self.productions[id.index()].lhs;
            rules.avoid.entry(lhs).or_default().insert(id);
        }

        rules.seal();
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_interning_dedupes() {
        let mut builder = GrammarBuilder::new();
        let first = builder.production("S", [t('a'), nt("S")]);
        let second = builder.production("S", [t('a'), nt("S")]);
        let third = builder.production("S", [t('b')]);
        assert_eq!(first, second);
        assert_ne!(first, third);
    }

    #[test]
    fn build_requires_start() {
        let mut builder = GrammarBuilder::new();
        builder.production("S", [t('a')]);
        assert!(matches!(builder.build(), Err(GrammarError::MissingStart)));
    }

    #[test]
    fn build_requires_start_production() {
        let mut builder = GrammarBuilder::new();
        builder.production("S", [t('a')]);
        builder.start("T");
        assert!(matches!(
            builder.build(),
            Err(GrammarError::NoStartProduction { .. })
        ));
    }

    #[test]
    fn build_rejects_undefined_references() {
        let mut builder = GrammarBuilder::new();
        builder.production("S", [nt("Ghost")]);
        builder.start("S");
        let err = builder.build().unwrap_err();
        match err {
            GrammarError::UndefinedNonTerminal { lhs, name } => {
                assert_eq!(lhs, "S");
                assert_eq!(name, "Ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_rule_subject_becomes_warning() {
        let mut builder = GrammarBuilder::new();
        builder.production("S", [t('a')]);
        builder.start("S");
        builder.reject_literal("Ghost", "a");
        let grammar = builder.build().unwrap();
        assert_eq!(grammar.warnings().len(), 1);
        assert!(grammar.rules().reject.is_empty());
    }

    #[test]
    fn literal_follow_restriction_warns_but_installs() {
        let mut builder = GrammarBuilder::new();
        builder.production("S", [t('a')]);
        builder.start("S");
        builder.follow_restriction_literal("a", "b").unwrap();
        let grammar = builder.build().unwrap();
        assert_eq!(grammar.warnings().len(), 1);
        assert_eq!(grammar.rules().follow_literal.len(), 1);
    }

    #[test]
    fn grammar_exposes_productions_by_lhs() {
        let mut builder = GrammarBuilder::new();
        let a = builder.production("S", [t('a'), nt("S")]);
        let b = builder.production("S", [t('b')]);
        builder.start("S");
        let grammar = builder.build().unwrap();

        let s = grammar.non_terminal("S").unwrap();
        assert_eq!(grammar.productions_of(s), &[a, b]);
        assert!(grammar.non_terminal("T").is_none());
    }

    #[test]
    fn display_production_renders_symbols() {
        let mut builder = GrammarBuilder::new();
        let p = builder.production("S", [t('a'), any(), nt("S")]);
        let eps = builder.production("S", []);
        builder.start("S");
        let grammar = builder.build().unwrap();

        assert_eq!(grammar.display_production(p), "S -> 'a' · S");
        assert_eq!(grammar.display_production(eps), "S -> ε");
    }

    #[test]
    fn prefer_and_avoid_key_on_lhs() {
        let mut builder = GrammarBuilder::new();
        let short = builder.production("S", [t('i'), nt("S")]);
        let long = builder.production("S", [t('i'), nt("S"), t('e'), nt("S")]);
        builder.production("S", [t('x')]);
        builder.start("S");
        builder.prefer(short);
        builder.avoid(long);
        let grammar = builder.build().unwrap();

        let s = grammar.non_terminal("S").unwrap();
        assert!(grammar.rules().prefer_of(s).unwrap().contains(&short));
        assert!(grammar.rules().avoid_of(s).unwrap().contains(&long));
    }
}
