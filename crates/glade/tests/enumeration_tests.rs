//! Tree enumeration: ordering, laziness, independence of OR choices.

use glade::grammar::{GrammarBuilder, nt, t};
use glade::{ParseTree, Parser};
use std::collections::HashSet;

fn parser_of(build: impl FnOnce(&mut GrammarBuilder)) -> Parser {
    let mut builder = GrammarBuilder::new();
    build(&mut builder);
    Parser::new(builder.build().expect("grammar should build"))
}

#[test]
fn enumeration_order_is_deterministic() {
    let parser = parser_of(|g| {
        g.production("S", [nt("S"), nt("S")]);
        g.production("S", [t('a')]);
        g.start("S");
    });

    let forest = parser.parse("aaaa");
    let first_run: Vec<ParseTree> = forest.trees().collect();
    let second_run: Vec<ParseTree> = forest.trees().collect();
    assert_eq!(first_run, second_run);
    assert_eq!(first_run.len(), 5);
}

#[test]
fn disjoint_or_nodes_multiply() {
    // Two ambiguous subtrees separated by a terminal: every combination
    // of their branch choices must appear.
    let parser = parser_of(|g| {
        g.production("S", [nt("P"), t('x'), nt("P")]);
        g.production("P", [nt("P"), nt("P")]);
        g.production("P", [t('a')]);
        g.start("S");
    });

    let forest = parser.parse("aaaxaaa");
    let trees: Vec<ParseTree> = forest.trees().collect();
    assert_eq!(trees.len(), 4);

    let distinct: HashSet<&ParseTree> = trees.iter().collect();
    assert_eq!(distinct.len(), 4);

    // Each side must take both of its two shapes across the run.
    let sides: HashSet<(String, String)> = trees
        .iter()
        .map(|tree| {
            let ParseTree::Node { children, .. } = tree else {
                panic!("root must be a node");
            };
            let grammar = parser.grammar();
            (
                children[0].display(grammar).to_string(),
                children[2].display(grammar).to_string(),
            )
        })
        .collect();
    assert_eq!(sides.len(), 4);
    let left_shapes: HashSet<&String> = sides.iter().map(|(left, _)| left).collect();
    let right_shapes: HashSet<&String> = sides.iter().map(|(_, right)| right).collect();
    assert_eq!(left_shapes.len(), 2);
    assert_eq!(right_shapes.len(), 2);
}

#[test]
fn enumeration_is_lazy() {
    let parser = parser_of(|g| {
        g.production("S", [nt("S"), nt("S")]);
        g.production("S", [t('a')]);
        g.start("S");
    });

    // C_9 = 4862 trees; taking three must not walk them all.
    let forest = parser.parse("aaaaaaaaaa");
    let some: Vec<ParseTree> = forest.trees().take(3).collect();
    assert_eq!(some.len(), 3);
    let distinct: HashSet<&ParseTree> = some.iter().collect();
    assert_eq!(distinct.len(), 3);
}

#[test]
fn roots_are_enumerated_in_order() {
    let parser = parser_of(|g| {
        g.production("S", [nt("A")]);
        g.production("S", [nt("B")]);
        g.production("A", [t('z')]);
        g.production("B", [t('z')]);
        g.start("S");
    });

    let forest = parser.parse("z");
    let renderings: Vec<String> = forest
        .trees()
        .map(|tree| tree.display(parser.grammar()).to_string())
        .collect();
    assert_eq!(renderings, vec!["S(A('z'))", "S(B('z'))"]);
}

#[test]
fn shared_epsilon_node_appears_in_every_occurrence() {
    let parser = parser_of(|g| {
        g.production("S", [nt("A"), nt("A"), t('y')]);
        g.production("A", []);
        g.start("S");
    });

    let forest = parser.parse("y");
    let trees: Vec<ParseTree> = forest.trees().collect();
    assert_eq!(trees.len(), 1);
    let ParseTree::Node { children, .. } = &trees[0] else {
        panic!("root must be a node");
    };
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], children[1]);
}

#[test]
fn abandoning_enumeration_is_safe() {
    let parser = parser_of(|g| {
        g.production("S", [nt("S"), nt("S")]);
        g.production("S", [t('a')]);
        g.start("S");
    });

    let forest = parser.parse("aaaaa");
    {
        let mut trees = forest.trees();
        trees.next();
        // Dropped mid-run.
    }
    assert_eq!(forest.count(), 14);
}
