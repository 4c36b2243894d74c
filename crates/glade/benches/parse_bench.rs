use criterion::{Criterion, criterion_group, criterion_main};
use glade::Parser;
use glade::grammar::{GrammarBuilder, nt, t};
use std::hint::black_box;

fn expression_parser() -> Parser {
    let mut builder = GrammarBuilder::new();
    let add = builder.production("E", [nt("E"), t('+'), nt("E")]);
    let mul = builder.production("E", [nt("E"), t('*'), nt("E")]);
    builder.production("E", [nt("N")]);
    for digit in '0'..='9' {
        builder.production("N", [t(digit)]);
    }
    builder.priority(mul, add);
    builder.left(add);
    builder.left(mul);
    builder.start("E");
    Parser::new(builder.build().unwrap())
}

fn catalan_parser() -> Parser {
    let mut builder = GrammarBuilder::new();
    builder.production("S", [nt("S"), nt("S")]);
    builder.production("S", [t('a')]);
    builder.start("S");
    Parser::new(builder.build().unwrap())
}

fn bench_recognize(c: &mut Criterion) {
    let parser = expression_parser();
    let input = "1+2*3+4*5+6*7+8*9";
    c.bench_function("recognize/expression", |b| {
        b.iter(|| parser.recognize(black_box(input)));
    });
}

fn bench_parse_disambiguated(c: &mut Criterion) {
    let parser = expression_parser();
    let input = "1+2*3+4*5+6";
    c.bench_function("parse/expression", |b| {
        b.iter(|| parser.parse(black_box(input)).count());
    });
}

fn bench_parse_dense_ambiguity(c: &mut Criterion) {
    let parser = catalan_parser();
    let input = "aaaaaaa";
    c.bench_function("parse/catalan7", |b| {
        b.iter(|| parser.parse(black_box(input)).count());
    });
}

criterion_group!(
    benches,
    bench_recognize,
    bench_parse_disambiguated,
    bench_parse_dense_ambiguity
);
criterion_main!(benches);
