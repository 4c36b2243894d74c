//! # Glade
//!
//! General context-free parsing for ambiguous grammars, with shared
//! packed parse forests and declarative disambiguation.
//!
//! ## Overview
//!
//! Glade parses any BNF-normalized context-free grammar, including
//! ambiguous, left-recursive and ε-heavy grammars, and represents *all*
//! derivations of an input at once:
//!
//! - **Recognition**: an Earley chart engine with nullable support and a
//!   wildcard "any one character" terminal.
//! - **Forests**: completed chart items become a packed DAG in which one
//!   node covers every derivation of a production over a span.
//! - **Disambiguation**: priority, associativity, reject,
//!   follow-restriction and prefer/avoid rules prune the forest
//!   declaratively.
//! - **Enumeration**: surviving trees stream out lazily, each distinct
//!   tree exactly once; a forest reduced to a single tree can be
//!   annotated with user bindings per production.
//!
//! ## Quick Start
//!
//! ```
//! use glade::{GrammarBuilder, Parser, nt, t};
//!
//! // S -> S + S | a, left-associative.
//! let mut builder = GrammarBuilder::new();
//! let add = builder.production("S", [nt("S"), t('+'), nt("S")]);
//! builder.production("S", [t('a')]);
//! builder.left(add);
//! builder.start("S");
//!
//! let parser = Parser::new(builder.build().unwrap());
//! assert!(parser.recognize("a+a+a"));
//!
//! let forest = parser.parse("a+a+a");
//! assert_eq!(forest.count(), 1);
//! let tree = forest.trees().next().unwrap();
//! assert_eq!(
//!     tree.display(parser.grammar()).to_string(),
//!     "S(S(S('a'), '+', S('a')), '+', S('a'))",
//! );
//! ```
//!
//! ## Modules
//!
//! - [`grammar`] - symbols, productions, the grammar builder
//! - [`disambiguation`] - the declarative rule bundle
//! - [`earley`] - the chart engine
//! - [`forest`] - packed forests, trees, enumeration
//! - [`parser`] - the parsing facade
//! - [`error`] - construction errors and warnings
//! - [`testing`] - oracles for cross-checking the parser

pub mod disambiguation;
pub mod earley;
pub mod error;
pub mod forest;
pub mod grammar;
pub mod intern;
pub mod parser;
pub mod testing;

pub use disambiguation::{Associativity, RejectPattern, Ruleset};
pub use error::{GrammarError, RuleWarning};
pub use forest::{AnnotatedTree, Forest, ParseTree, Trees};
pub use grammar::{Grammar, GrammarBuilder, Production, ProductionId, Sym, Symbol, any, nt, t};
pub use intern::{Interner, NtName};
pub use parser::Parser;
