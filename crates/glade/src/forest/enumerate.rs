//! Lazy tree enumeration.
//!
//! The iterator walks the forest depth first and treats every OR-node it
//! actually reaches as one digit of an odometer: an ordered list of
//! `(node, alternative)` decisions in discovery order. Advancing pops
//! exhausted trailing decisions, bumps the deepest advanceable one and
//! drops everything discovered after it, so subtrees to the right of a
//! changed branch are rebuilt from scratch and every combination of
//! branch choices is produced exactly once.
//!
//! All enumeration state lives in the iterator; the forest itself is
//! never mutated, so independent enumerations of one forest can coexist.

use super::node::{Child, NodeId};
use super::tree::ParseTree;
use super::Forest;

type Map<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;

/// Iterator over every distinct tree of a [`Forest`], yielded in
/// deterministic order: roots first, then lexicographic branch choices,
/// depth first left to right.
pub struct Trees<'f> {
    forest: &'f Forest,
    root_index: usize,
    fresh_root: bool,
    decisions: Vec<(NodeId, usize)>,
    choice: Map<NodeId, usize>,
}

impl<'f> Trees<'f> {
    pub(crate) fn new(forest: &'f Forest) -> Self {
        Self {
            forest,
            root_index: 0,
            fresh_root: true,
            decisions: Vec::new(),
            choice: Map::default(),
        }
    }

    /// Build the tree under `id` for the current decision table. An
    /// OR-node seen for the first time in this tree is recorded with its
    /// first alternative; a node reached twice re-uses its recorded
    /// choice.
    fn build(&mut self, id: NodeId) -> ParseTree {
        let node = self.forest.node(id);
        let alternative_index = if node.is_or_node() {
            match self.choice.get(&id) {
                Some(&index) => index,
                None => {
                    self.choice.insert(id, 0);
                    self.decisions.push((id, 0));
                    0
                }
            }
        } else {
            0
        };

        let alternative = node.alternatives[alternative_index].clone();
        let mut children = Vec::with_capacity(alternative.len());
        for child in alternative {
            children.push(match child {
                Child::Leaf { ch, at } => ParseTree::Leaf { ch, at },
                Child::Node(child_id) => self.build(child_id),
            });
        }
        ParseTree::Node {
            prod: node.prod,
            start: node.start,
            end: node.end,
            children,
        }
    }
}

impl Iterator for Trees<'_> {
    type Item = ParseTree;

    fn next(&mut self) -> Option<ParseTree> {
        loop {
            let roots = self.forest.roots();
            if self.root_index >= roots.len() {
                return None;
            }

            if self.fresh_root {
                self.fresh_root = false;
                self.decisions.clear();
                self.choice.clear();
                let root = roots[self.root_index];
                return Some(self.build(root));
            }

            // Advance the odometer: drop exhausted trailing decisions,
            // bump the deepest advanceable one.
            loop {
                let Some((node, index)) = self.decisions.pop() else {
                    self.root_index += 1;
                    self.fresh_root = true;
                    break;
                };
                self.choice.remove(&node);
                if index + 1 < self.forest.node(node).alternatives.len() {
                    self.decisions.push((node, index + 1));
                    self.choice.insert(node, index + 1);
                    let root = roots[self.root_index];
                    return Some(self.build(root));
                }
            }
        }
    }
}
