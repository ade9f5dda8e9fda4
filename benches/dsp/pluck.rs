//! Benchmarks for the full plucked-string voice.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use plectra_dsp::graph::{GraphNode, RenderCtx};
use plectra_dsp::voices::params::{Ensemble, PluckParams};
use plectra_dsp::voices::{EnsemblePluck, PluckVoice};

use crate::BLOCK_SIZES;

pub fn bench_pluck(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/pluck");
    let ctx = RenderCtx::new(48_000.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let params = PluckParams {
            frequency_hz: 110.0,
            sustain_secs: 3_600.0, // keep the loop live for the whole run
            ..Default::default()
        };

        let mut voice = PluckVoice::new(&params, 48_000.0);
        group.bench_with_input(BenchmarkId::new("single_string", size), &size, |b, _| {
            b.iter(|| {
                voice.render_block(black_box(&mut buffer), &ctx);
            })
        });

        let ensemble = Ensemble::default();
        let mut voice = EnsemblePluck::new(&params, &ensemble, 48_000.0);
        group.bench_with_input(BenchmarkId::new("ensemble_3", size), &size, |b, _| {
            b.iter(|| {
                voice.render_block(black_box(&mut buffer), &ctx);
            })
        });
    }

    group.finish();
}
