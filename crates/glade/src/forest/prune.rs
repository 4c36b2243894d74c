//! Rule application and dead-node collection.
//!
//! Rules are applied in a fixed order: prefer/avoid, reject and follow
//! restrictions discard whole nodes; priority and associativity discard
//! single alternatives; a fixed-point sweep then removes nodes left
//! without a derivation, alternatives referencing them, and anything no
//! longer reachable from a surviving root.

use super::node::{Child, ForestNode, NodeId};
use crate::grammar::{Grammar, ProductionId};
use crate::intern::NtName;

type Map<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;

/// Apply the grammar's disambiguation rules to the forest.
pub(crate) fn apply_rules(
    grammar: &Grammar,
    input: &[char],
    mut nodes: Vec<ForestNode>,
    roots: Vec<NodeId>,
) -> (Vec<ForestNode>, Vec<NodeId>) {
    let rules = grammar.rules();
    if rules.is_empty() {
        return (nodes, roots);
    }

    let mut condemned = vec![false; nodes.len()];

    // Prefer/avoid operate on groups of competing completions: same lhs,
    // same span, different productions.
    let mut groups: Map<(NtName, usize, usize), Vec<usize>> = Map::default();
    for (index, node) in nodes.iter().enumerate() {
        let lhs = grammar.production(node.prod).lhs;
        groups.entry((lhs, node.start, node.end)).or_default().push(index);
    }
    for (&(lhs, _, _), members) in &groups {
        if let Some(avoided) = rules.avoid_of(lhs) {
            let hit: Vec<usize> = members
                .iter()
                .copied()
                .filter(|&m| avoided.contains(&nodes[m].prod))
                .collect();
            // Never empty a group outright.
            if hit.len() < members.len() {
                for m in hit {
                    condemned[m] = true;
                }
            }
        }
        if let Some(preferred) = rules.prefer_of(lhs) {
            let survivors: Vec<usize> =
                members.iter().copied().filter(|&m| !condemned[m]).collect();
            let kept = survivors
                .iter()
                .filter(|&&m| preferred.contains(&nodes[m].prod))
                .count();
            if kept > 0 {
                for m in survivors {
                    if !preferred.contains(&nodes[m].prod) {
                        condemned[m] = true;
                    }
                }
            }
        }
    }

    // Reject and follow restrictions discard nodes by their yield and by
    // the input right after their span.
    let yield_rules_installed = !rules.reject.is_empty()
        || !rules.follow.is_empty()
        || !rules.follow_literal.is_empty();
    if yield_rules_installed {
        for (index, node) in nodes.iter().enumerate() {
            if condemned[index] {
                continue;
            }
            let lhs = grammar.production(node.prod).lhs;
            let yield_text: String = input[node.start..node.end].iter().collect();
            let rest: String = input[node.end..].iter().collect();
            if rules.rejects(lhs, &yield_text) || rules.follow_violated(lhs, &yield_text, &rest) {
                condemned[index] = true;
            }
        }
    }

    for (index, is_condemned) in condemned.iter().enumerate() {
        if *is_condemned {
            nodes[index].alternatives.clear();
        }
    }

    // Priority and associativity are per-alternative: decide all flags
    // first, since validity reads other nodes' productions.
    let keep: Vec<Vec<bool>> = nodes
        .iter()
        .map(|node| {
            node.alternatives
                .iter()
                .map(|alt| {
                    let node_children: Vec<ProductionId> = alt
                        .iter()
                        .filter_map(|child| match child {
                            Child::Node(id) => Some(nodes[id.index()].prod),
                            Child::Leaf { .. } => None,
                        })
                        .collect();
                    let first = match alt.first() {
                        Some(Child::Node(id)) => Some(nodes[id.index()].prod),
                        _ => None,
                    };
                    let last = match alt.last() {
                        Some(Child::Node(id)) => Some(nodes[id.index()].prod),
                        _ => None,
                    };
                    rules.allows_alternative(node.prod, first, last, &node_children)
                })
                .collect()
        })
        .collect();
    for (node, flags) in nodes.iter_mut().zip(keep) {
        let mut cursor = 0;
        node.alternatives.retain(|_| {
            let kept = flags[cursor];
            cursor += 1;
            kept
        });
    }

    sweep(nodes, roots)
}

/// Remove nodes without alternatives, alternatives referencing them, and
/// nodes unreachable from the surviving roots; compact ids.
pub(crate) fn sweep(
    mut nodes: Vec<ForestNode>,
    roots: Vec<NodeId>,
) -> (Vec<ForestNode>, Vec<NodeId>) {
    let mut alive: Vec<bool> = nodes
        .iter()
        .map(|node| !node.alternatives.is_empty())
        .collect();

    loop {
        let mut changed = false;
        for index in 0..nodes.len() {
            if !alive[index] {
                continue;
            }
            let before = nodes[index].alternatives.len();
            nodes[index].alternatives.retain(|alt| {
                alt.iter().all(|child| match child {
                    Child::Node(id) => alive[id.index()],
                    Child::Leaf { .. } => true,
                })
            });
            if nodes[index].alternatives.len() != before {
                changed = true;
                if nodes[index].alternatives.is_empty() {
                    alive[index] = false;
                }
            }
        }
        if !changed {
            break;
        }
    }

    let mut reachable = vec![false; nodes.len()];
    let mut stack: Vec<NodeId> = roots
        .iter()
        .copied()
        .filter(|root| alive[root.index()])
        .collect();
    for root in &stack {
        reachable[root.index()] = true;
    }
    while let Some(id) = stack.pop() {
        for alt in &nodes[id.index()].alternatives {
            for child in alt {
                if let Child::Node(child_id) = child {
                    if !reachable[child_id.index()] {
                        reachable[child_id.index()] = true;
                        stack.push(*child_id);
                    }
                }
            }
        }
    }

    let mut remap: Vec<Option<NodeId>> = vec![None; nodes.len()];
    let mut compacted: Vec<ForestNode> = Vec::new();
    for (index, node) in nodes.into_iter().enumerate() {
        if alive[index] && reachable[index] {
            remap[index] = Some(NodeId::new(compacted.len() as u32));
            compacted.push(node);
        }
    }
    for node in &mut compacted {
        for alt in &mut node.alternatives {
            for child in alt.iter_mut() {
                if let Child::Node(id) = child {
                    *child = Child::Node(
                        remap[id.index()].expect("children of surviving nodes survive the sweep"),
                    );
                }
            }
        }
    }
    let roots: Vec<NodeId> = roots
        .iter()
        .filter_map(|root| remap[root.index()])
        .collect();

    (compacted, roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earley::recognize;
    use crate::forest::build;
    use crate::grammar::{Grammar, GrammarBuilder, nt, t};

    fn forest_of(grammar: &Grammar, input: &str) -> (Vec<ForestNode>, Vec<NodeId>, Vec<char>) {
        let chars: Vec<char> = input.chars().collect();
        let (chart, accepted) = recognize(grammar, &chars);
        assert!(accepted);
        let (nodes, roots) = build::build(grammar, &chart, &chars);
        (nodes, roots, chars)
    }

    #[test]
    fn sweep_drops_unreachable_nodes() {
        let mut builder = GrammarBuilder::new();
        let ambiguous = builder.production("S", [nt("S"), nt("S")]);
        builder.production("S", [t('a')]);
        builder.start("S");
        builder.non_assoc(ambiguous);
        let grammar = builder.build().unwrap();

        let (nodes, roots, chars) = forest_of(&grammar, "aa");
        // `none` associativity kills the only nesting, emptying the forest.
        let (nodes, roots) = apply_rules(&grammar, &chars, nodes, roots);
        assert!(roots.is_empty());
        assert!(nodes.is_empty());
    }

    #[test]
    fn rule_application_is_idempotent() {
        let mut builder = GrammarBuilder::new();
        let concat = builder.production("S", [nt("S"), nt("S")]);
        builder.production("S", [t('a')]);
        builder.start("S");
        builder.left(concat);
        let grammar = builder.build().unwrap();

        let (nodes, roots, chars) = forest_of(&grammar, "aaaa");
        let (once_nodes, once_roots) = apply_rules(&grammar, &chars, nodes, roots);
        let (twice_nodes, twice_roots) =
            apply_rules(&grammar, &chars, once_nodes.clone(), once_roots.clone());
        assert_eq!(once_nodes, twice_nodes);
        assert_eq!(once_roots, twice_roots);
    }

    #[test]
    fn avoid_never_empties_a_group() {
        let mut builder = GrammarBuilder::new();
        let only = builder.production("S", [t('a')]);
        builder.start("S");
        builder.avoid(only);
        let grammar = builder.build().unwrap();

        let (nodes, roots, chars) = forest_of(&grammar, "a");
        let (_, roots) = apply_rules(&grammar, &chars, nodes, roots);
        assert_eq!(roots.len(), 1);
    }
}
