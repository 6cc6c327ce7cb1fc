//! Benchmarks for the early reflections stage and node.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use velvet_reverb::dsp::early::EarlyReflections;
use velvet_reverb::graph::{early::EarlyReflectionsNode, GraphNode, RenderCtx};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_early(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/early");
    let ctx = RenderCtx::new(48_000.0);

    for &size in BLOCK_SIZES {
        let input = test_signal(size);

        let mut stage = EarlyReflections::new();
        stage.prepare(48_000.0, size, 1);
        let mut output = vec![0.0f32; size];
        group.bench_with_input(BenchmarkId::new("stage", size), &size, |b, _| {
            b.iter(|| {
                stage.process(black_box(&input), black_box(&mut output), 0.8);
            })
        });

        let mut node = EarlyReflectionsNode::room(48_000.0, 1);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("node_mix", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                node.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
