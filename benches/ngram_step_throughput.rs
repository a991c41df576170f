//! N-gram step throughput benchmark
//!
//! The engine runs once per executed instruction inside the host VM, so
//! `on_step` is the hot path. This measures steps per second for bigram
//! and trigram tracers over a loop-heavy synthetic trace with periodic
//! nested calls.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench ngram_step_throughput
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use opgram::config::NgramConfig;
use opgram::sequence::{CallDepth, NgramTracer};

const LOOP_BODY: &[&str] = &[
    "JUMPDEST", "PUSH1", "DUP2", "LT", "ISZERO", "PUSH2", "JUMPI", "PUSH1", "ADD", "SLOAD",
    "PUSH2", "JUMP",
];

/// Build a trace that enters a nested call every 64 instructions
fn synthetic_trace(len: usize) -> Vec<(&'static str, CallDepth)> {
    (0..len)
        .map(|i| {
            let depth = if (i / 64) % 2 == 0 { 1 } else { 2 };
            (LOOP_BODY[i % LOOP_BODY.len()], depth)
        })
        .collect()
}

fn bench_on_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("ngram_on_step");

    for len in [1_000usize, 10_000, 100_000] {
        let trace = synthetic_trace(len);
        group.throughput(Throughput::Elements(len as u64));

        for (name, config) in [
            ("bigram", NgramConfig::bigram()),
            ("trigram", NgramConfig::trigram()),
        ] {
            group.bench_with_input(BenchmarkId::new(name, len), &trace, |b, trace| {
                b.iter(|| {
                    let mut tracer = NgramTracer::new(config);
                    for (op, depth) in trace {
                        tracer.on_step(black_box(op), black_box(*depth));
                    }
                    black_box(tracer.into_result())
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_on_step);
criterion_main!(benches);
