// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Performance Benchmarks for the Context Analysis Engine
 * Measures classification and full-analysis throughput
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tutka_engine::builtin;
use tutka_engine::classifier::{classify, classify_parallel};
use tutka_engine::engine::AnalysisEngine;
use tutka_engine::types::AnalyzeOptions;

const INPUTS: &[(&str, &str)] = &[
    ("benign", "hello world this is a plain comment field value"),
    ("script_tag", "<script>alert(1)</script>"),
    (
        "multi_context",
        "{{7*7}} <script>alert(1)</script> javascript:alert(1) onload=x",
    ),
    (
        "long_benign",
        "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
         tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim \
         veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip.",
    ),
];

fn bench_engine_construction(c: &mut Criterion) {
    c.bench_function("engine_init_builtin", |b| {
        b.iter(|| black_box(AnalysisEngine::with_builtin().unwrap()));
    });
}

fn bench_analyze(c: &mut Criterion) {
    let engine = AnalysisEngine::with_builtin().unwrap();
    let options = AnalyzeOptions::default();

    let mut group = c.benchmark_group("analyze");
    for (name, input) in INPUTS {
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| black_box(engine.analyze(input, &options)));
        });
    }
    group.finish();
}

fn bench_classify_sequential_vs_parallel(c: &mut Criterion) {
    let kb = builtin::knowledge_base().unwrap();
    let input = "{{7*7}} <script>alert(1)</script> javascript:alert(1) onload=x";

    let mut group = c.benchmark_group("classify");
    group.bench_function("sequential", |b| {
        b.iter(|| black_box(classify(&kb, input)));
    });
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(classify_parallel(&kb, input)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_engine_construction,
    bench_analyze,
    bench_classify_sequential_vs_parallel
);
criterion_main!(benches);
