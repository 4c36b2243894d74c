//! Translating a filled chart into a packed forest.

use super::node::{Alternative, Child, ForestNode, NodeId};
use super::prune;
use crate::earley::Chart;
use crate::grammar::{Grammar, ProductionId, Symbol};
use crate::intern::NtName;

type Map<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;

/// Build the forest for a recognized input: mint one node per completed
/// `(production, origin, end)` triple, spell out each node's alternatives,
/// then sweep nodes that admit no derivation.
pub(crate) fn build(
    grammar: &Grammar,
    chart: &Chart,
    input: &[char],
) -> (Vec<ForestNode>, Vec<NodeId>) {
    let n = input.len();
    let mut nodes: Vec<ForestNode> = Vec::new();
    let mut minted: Map<(ProductionId, usize, usize), NodeId> = Map::default();
    let mut starting_at: Map<(NtName, usize), Vec<NodeId>> = Map::default();

    // Chart order keeps node ids, and therefore enumeration order,
    // deterministic.
    for end in 0..chart.len() {
        for item in chart.items(end) {
            if !item.is_complete(grammar) {
                continue;
            }
            let key = (item.prod, item.origin, end);
            if minted.contains_key(&key) {
                continue;
            }
            let id = NodeId::new(nodes.len() as u32);
            minted.insert(key, id);
            let lhs = grammar.production(item.prod).lhs;
            starting_at.entry((lhs, item.origin)).or_default().push(id);
            nodes.push(ForestNode {
                prod: item.prod,
                start: item.origin,
                end,
                alternatives: Vec::new(),
            });
        }
    }

    for index in 0..nodes.len() {
        let id = NodeId::new(index as u32);
        let (prod, start, end) = (nodes[index].prod, nodes[index].start, nodes[index].end);
        let alternatives = spell_out(grammar, &nodes, &starting_at, input, id, prod, start, end);
        nodes[index].alternatives = alternatives;
    }

    let roots: Vec<NodeId> = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| {
            node.start == 0 && node.end == n && grammar.production(node.prod).lhs == grammar.start()
        })
        .map(|(index, _)| NodeId::new(index as u32))
        .collect();

    prune::sweep(nodes, roots)
}

/// Enumerate every way the production's symbols tile `[start, end]` with
/// child nodes and leaves, left to right. The node itself is never its
/// own child, which breaks trivial same-span cycles.
#[allow(clippy::too_many_arguments)]
fn spell_out(
    grammar: &Grammar,
    nodes: &[ForestNode],
    starting_at: &Map<(NtName, usize), Vec<NodeId>>,
    input: &[char],
    id: NodeId,
    prod: ProductionId,
    start: usize,
    end: usize,
) -> Vec<Alternative> {
    let rhs = &grammar.production(prod).rhs;
    let mut partials: Vec<(usize, Alternative)> = vec![(start, Alternative::new())];

    for sym in rhs {
        let mut extended = Vec::new();
        for (cursor, children) in &partials {
            match sym {
                Symbol::Terminal(_) | Symbol::Wildcard => {
                    if *cursor < end && sym.matches(input[*cursor]) {
                        let mut next = children.clone();
                        next.push(Child::Leaf {
                            ch: input[*cursor],
                            at: *cursor,
                        });
                        extended.push((*cursor + 1, next));
                    }
                }
                Symbol::NonTerminal(name) => {
                    let Some(candidates) = starting_at.get(&(*name, *cursor)) else {
                        continue;
                    };
                    for &candidate in candidates {
                        if candidate == id {
                            continue;
                        }
                        let candidate_end = nodes[candidate.index()].end;
                        if candidate_end <= end {
                            let mut next = children.clone();
                            next.push(Child::Node(candidate));
                            extended.push((candidate_end, next));
                        }
                    }
                }
            }
        }
        partials = extended;
    }

    partials
        .into_iter()
        .filter(|(cursor, _)| *cursor == end)
        .map(|(_, children)| children)
        .collect()
}
