//! Benchmarks for the delay-line step (the string model's hot loop).

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use plectra_dsp::dsp::delay::DelayLine;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Delay lengths spanning the playable range at 48kHz.
    let frequencies: &[f32] = &[
        55.0,   // A1: ~873-sample line
        220.0,  // A3: ~218-sample line
        1760.0, // A6: ~27-sample line
    ];

    for &size in BLOCK_SIZES {
        for &freq in frequencies {
            let mut delay = DelayLine::for_frequency(48_000.0, freq);
            let len = delay.len();

            group.bench_with_input(
                BenchmarkId::new(format!("step_{}hz", freq as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        // One full read-average-write step per sample.
                        let mut acc = 0.0f32;
                        for _ in 0..size {
                            let s1 = delay.read(black_box(len));
                            let s2 = delay.read(black_box(len - 1));
                            let next = (s1 + s2) * 0.5 * 0.996;
                            delay.write(next);
                            acc += s1;
                        }
                        acc
                    })
                },
            );
        }
    }

    group.finish();
}
