//! Whole-engine scenario: a six-string strum mixed to all sinks.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use plectra_dsp::voices::params::PluckParams;
use plectra_dsp::{EngineConfig, PlectraEngine};

use crate::BLOCK_SIZES;

pub fn bench_strum(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/strum");

    for &size in BLOCK_SIZES {
        let config = EngineConfig::default();
        let (mut engine, mut handle) = PlectraEngine::new(config);

        for freq in [82.41, 110.0, 146.83, 196.0, 246.94, 329.63] {
            handle
                .trigger_pluck(PluckParams {
                    frequency_hz: freq,
                    sustain_secs: 3_600.0, // keep all six live for the whole run
                    ..Default::default()
                })
                .expect("valid params");
        }

        let mut buffer = vec![0.0f32; size];
        // Install the voices before measuring.
        engine.render_block(&mut buffer);

        group.bench_with_input(BenchmarkId::new("six_strings", size), &size, |b, _| {
            b.iter(|| {
                engine.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
