//! Benchmarks for the scheduled gain envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use plectra_dsp::dsp::envelope::GainEnvelope;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Exponential decay (the shape every voice uses)
        let mut env = GainEnvelope::decay(1.0, 10.0, 48_000.0);
        group.bench_with_input(BenchmarkId::new("exp_decay", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Attack-then-decay schedule
        let mut env = GainEnvelope::at(0.0)
            .linear_to(1.0, 5.0, 48_000.0)
            .exp_to(0.0, 10.0, 48_000.0);
        group.bench_with_input(BenchmarkId::new("attack_decay", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
