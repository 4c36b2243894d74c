//! # Shared Packed Parse Forest
//!
//! A [`Forest`] packs every derivation of one input into a DAG: one node
//! per `(production, span)` pair, with OR-alternatives covering distinct
//! derivations. Forests are produced by [`Parser::parse`], already pruned
//! by the grammar's disambiguation rules.
//!
//! Surviving trees are read off lazily with [`Forest::trees`]; when
//! exactly one survives, [`Forest::unique_annotated`] attaches user
//! bindings to its nodes.
//!
//! [`Parser::parse`]: crate::parser::Parser::parse

mod build;
mod enumerate;
mod node;
mod prune;
mod tree;

pub use enumerate::Trees;
pub use node::{Alternative, Child, ForestNode, NodeId};
pub use tree::{AnnotatedTree, ParseTree, TreeDisplay};

use crate::grammar::{Grammar, Production};
use std::sync::Arc;

/// The pruned forest of one parse, together with the input it spans and
/// the grammar that produced it.
#[derive(Debug, Clone)]
pub struct Forest {
    grammar: Arc<Grammar>,
    input: Vec<char>,
    nodes: Vec<ForestNode>,
    roots: Vec<NodeId>,
}

impl Forest {
    pub(crate) fn build(grammar: Arc<Grammar>, input: Vec<char>, chart: &crate::earley::Chart) -> Self {
        let (nodes, roots) = build::build(&grammar, chart, &input);
        let (nodes, roots) = prune::apply_rules(&grammar, &input, nodes, roots);
        Self {
            grammar,
            input,
            nodes,
            roots,
        }
    }

    pub(crate) fn empty(grammar: Arc<Grammar>, input: Vec<char>) -> Self {
        Self {
            grammar,
            input,
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// The grammar this forest was parsed with.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The parsed input, one entry per character.
    #[must_use]
    pub fn input(&self) -> &[char] {
        &self.input
    }

    /// Root nodes: completions of the start symbol over the whole input.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// The node behind an id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &ForestNode {
        &self.nodes[id.index()]
    }

    /// Number of nodes surviving disambiguation.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of surviving nodes that still pack multiple derivations.
    #[must_use]
    pub fn ambiguous_node_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_or_node()).count()
    }

    /// Whether no tree survived (the input was not recognized, or
    /// disambiguation pruned everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of surviving trees.
    ///
    /// Runs the enumeration walk to completion; with dense ambiguity this
    /// is as expensive as the enumeration itself.
    #[must_use]
    pub fn count(&self) -> usize {
        self.trees().count()
    }

    /// Lazily enumerate every surviving tree, each exactly once.
    #[must_use]
    pub fn trees(&self) -> Trees<'_> {
        Trees::new(self)
    }

    /// When exactly one tree survives, rebuild it with `binder` applied
    /// to every internal node's production; otherwise `None`.
    pub fn unique_annotated<A>(
        &self,
        mut binder: impl FnMut(&Production) -> Option<A>,
    ) -> Option<AnnotatedTree<A>> {
        let mut trees = self.trees();
        let first = trees.next()?;
        if trees.next().is_some() {
            return None;
        }
        Some(tree::annotate(&first, &self.grammar, &mut binder))
    }
}
