// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use notc_compiler::compiler::generate;
use notc_compiler::lexer::lex;
use notc_compiler::module::decode;
use notc_compiler::parser::parse;
use notc_compiler::{compile_source, encode_chunk};

fn sample_source() -> String {
    let mut source = String::from("def main() -> int {\n    int total = 0;\n}\n");
    for i in 0..80 {
        source.push_str(&format!("({i} + 2) * -3 / 4 == {i};\n"));
    }
    source
}

fn bench_stages(c: &mut Criterion) {
    let source = sample_source();
    let tokens = lex(&source).tokens;
    let root = parse(tokens.clone()).root;
    let module = compile_source(&source)
        .chunk
        .and_then(|chunk| encode_chunk(&chunk).ok())
        .unwrap_or_default();

    c.bench_function("lex", |b| b.iter(|| lex(black_box(&source))));
    c.bench_function("parse", |b| b.iter(|| parse(black_box(tokens.clone()))));
    c.bench_function("generate", |b| b.iter(|| generate(black_box(&root))));
    c.bench_function("decode", |b| b.iter(|| decode(black_box(&module))));
    c.bench_function("compile_source", |b| {
        b.iter(|| compile_source(black_box(&source)))
    });
}

criterion_group!(benches, bench_stages);
criterion_main!(benches);
