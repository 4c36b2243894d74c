#![no_main]
use glade::grammar::{GrammarBuilder, nt, t};
use glade::Parser;
use libfuzzer_sys::fuzz_target;

fn fuzz_parser() -> Parser {
    let mut builder = GrammarBuilder::new();
    let add = builder.production("E", [nt("E"), t('+'), nt("E")]);
    let mul = builder.production("E", [nt("E"), t('*'), nt("E")]);
    builder.production("E", [t('('), nt("E"), t(')')]);
    for digit in '0'..='9' {
        builder.production("E", [t(digit)]);
    }
    builder.priority(mul, add);
    builder.left(add);
    builder.left(mul);
    builder.start("E");
    Parser::new(builder.build().expect("fuzz grammar should build"))
}

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if input.len() > 24 {
        return;
    }

    let parser = fuzz_parser();
    let recognized = parser.recognize(input);
    let forest = parser.parse(input);

    // Recognition and parsing must agree, and every yielded tree must
    // derive the whole input.
    if !recognized {
        assert!(forest.is_empty());
        return;
    }
    for tree in forest.trees().take(32) {
        assert_eq!(tree.yield_string(), input);
    }
});
