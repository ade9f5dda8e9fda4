//! End-to-end engine scenarios: triggering, routing, lifecycle, and the
//! acoustic properties of the voices as heard at the sinks.

use plectra_dsp::analysis::dominant_frequency;
use plectra_dsp::voices::params::{
    HihatParams, KickParams, PercussionParams, PluckMode, PluckParams, SnareParams, TomParams,
};
use plectra_dsp::{EngineConfig, EngineError, PlectraEngine};

const SAMPLE_RATE: f32 = 44_100.0;

fn config() -> EngineConfig {
    EngineConfig {
        sample_rate: SAMPLE_RATE,
        ..Default::default()
    }
}

fn render_secs(engine: &mut PlectraEngine, secs: f32) -> Vec<f32> {
    let total = (secs * SAMPLE_RATE) as usize;
    let mut output = vec![0.0; total];
    for chunk in output.chunks_mut(512) {
        engine.render_block(chunk);
    }
    output
}

fn rms(buffer: &[f32]) -> f32 {
    (buffer.iter().map(|s| s * s).sum::<f32>() / buffer.len() as f32).sqrt()
}

#[test]
fn strum_spawns_six_independent_voices() {
    let (mut engine, mut handle) = PlectraEngine::new(config());

    // Standard-tuning open strings, longest sustain on the lowest.
    let strings = [82.41, 110.0, 146.83, 196.0, 246.94, 329.63];
    for (i, freq) in strings.iter().enumerate() {
        handle
            .trigger_pluck(PluckParams {
                frequency_hz: *freq,
                sustain_secs: 0.3 + 0.1 * i as f32,
                ..Default::default()
            })
            .unwrap();
    }

    let output = render_secs(&mut engine, 0.1);
    assert_eq!(engine.live_voices(), 6);
    assert!(rms(&output) > 0.0, "strum should be audible");

    // Each voice expires on its own schedule, shortest first.
    let mut seen = vec![engine.live_voices()];
    for _ in 0..9 {
        render_secs(&mut engine, 0.1);
        seen.push(engine.live_voices());
    }
    assert!(seen.windows(2).all(|w| w[1] <= w[0]), "live set must only shrink: {seen:?}");
    assert_eq!(*seen.last().unwrap(), 0, "all strings should be reaped: {seen:?}");
}

#[test]
fn thousand_short_triggers_leave_live_set_bounded() {
    let (mut engine, mut handle) = PlectraEngine::new(config());

    let mut peak_live = 0;
    for _ in 0..1_000 {
        handle
            .trigger_percussive(PercussionParams::Hihat(HihatParams {
                decay_secs: 0.01,
                ..Default::default()
            }))
            .unwrap();

        let mut block = [0.0f32; 512];
        engine.render_block(&mut block);
        peak_live = peak_live.max(engine.live_voices());
    }

    // ~10 ms decay + 50 ms margin is about six 512-sample blocks of life.
    assert!(peak_live <= 8, "live voices grew to {peak_live}");

    render_secs(&mut engine, 0.1);
    assert_eq!(engine.live_voices(), 0);
}

#[test]
fn every_voice_feeds_all_three_sinks() {
    let (mut engine, mut handle) = PlectraEngine::new(config());
    let mut capture = handle.take_capture_stream().unwrap();

    handle
        .trigger_percussive(PercussionParams::Snare(SnareParams::default()))
        .unwrap();

    let audible = render_secs(&mut engine, 0.1);
    assert!(rms(&audible) > 0.0, "audible sink should carry the snare");

    let captured = capture.drain();
    assert_eq!(captured, audible, "capture sink must mirror audible output");

    let snapshot = handle.analysis_snapshot();
    assert!(
        snapshot.iter().any(|s| s.abs() > 0.0),
        "analysis sink should carry the snare"
    );
    let window = snapshot.len();
    assert_eq!(
        snapshot,
        &audible[audible.len() - window..],
        "analysis window must be the most recent output, in order"
    );
}

#[test]
fn fixed_seed_makes_engine_output_reproducible() {
    let run = || {
        let (mut engine, mut handle) = PlectraEngine::new(config());
        let mut capture = handle.take_capture_stream().unwrap();

        handle
            .trigger_pluck(PluckParams {
                frequency_hz: 110.0,
                seed: 0x0BAD_5EED,
                sustain_secs: 0.5,
                ..Default::default()
            })
            .unwrap();
        handle
            .trigger_percussive(PercussionParams::Snare(SnareParams::default()))
            .unwrap();

        render_secs(&mut engine, 0.6);
        capture.drain()
    };

    let first = run();
    let second = run();
    assert!(!first.is_empty());
    assert_eq!(first, second, "identical seeds and triggers must replay exactly");
}

#[test]
fn pluck_decays_forty_decibels_by_scheduled_sustain() {
    let (mut engine, mut handle) = PlectraEngine::new(config());

    handle
        .trigger_pluck(PluckParams {
            frequency_hz: 220.0,
            damping: 0.996,
            sustain_secs: 2.0,
            ..Default::default()
        })
        .unwrap();

    let output = render_secs(&mut engine, 2.05);

    let early_at = (0.05 * SAMPLE_RATE) as usize;
    let late_at = (2.0 * SAMPLE_RATE) as usize;
    let early = rms(&output[early_at..early_at + 2048]);
    let late = rms(&output[late_at..late_at + 2048]);

    assert!(early > 0.001, "pluck should be audible at 50 ms");
    assert!(
        late < early * 0.01,
        "RMS at 2.0 s must be under 1% of RMS at 50 ms: early={early} late={late}"
    );
}

#[test]
fn rejected_damping_is_an_invalid_parameter_not_a_voice() {
    let (mut engine, mut handle) = PlectraEngine::new(config());

    for damping in [1.0, 1.5, f32::INFINITY] {
        let err = handle
            .trigger_pluck(PluckParams {
                damping,
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    render_secs(&mut engine, 0.05);
    assert_eq!(engine.live_voices(), 0);
}

#[test]
fn kick_sweeps_from_start_pitch_toward_end_pitch() {
    let (mut engine, mut handle) = PlectraEngine::new(config());

    handle
        .trigger_percussive(PercussionParams::Kick(KickParams {
            start_hz: 150.0,
            end_hz: 40.0,
            duration_secs: 0.5,
        }))
        .unwrap();

    let output = render_secs(&mut engine, 0.5);

    // First ~46 ms: the sweep has barely left the start pitch.
    let early = dominant_frequency(&output[..2048], SAMPLE_RATE).unwrap();
    // After the half-note sweep has finished, only the end pitch remains.
    let late_at = (0.3 * SAMPLE_RATE) as usize;
    let late = dominant_frequency(&output[late_at..late_at + 4096], SAMPLE_RATE).unwrap();

    assert!(
        (90.0..220.0).contains(&early),
        "early content should sit near 150 Hz, got {early}"
    );
    assert!(
        (15.0..70.0).contains(&late),
        "late content should sit near 40 Hz, got {late}"
    );
    assert!(late < early, "sweep must descend");
}

#[test]
fn sampled_and_feedback_plucks_both_play_through_the_engine() {
    let (mut engine, mut handle) = PlectraEngine::new(config());

    handle
        .trigger_pluck(PluckParams {
            mode: PluckMode::Feedback,
            sustain_secs: 0.3,
            ..Default::default()
        })
        .unwrap();
    handle
        .trigger_pluck(PluckParams {
            mode: PluckMode::Sampled,
            sustain_secs: 0.3,
            ..Default::default()
        })
        .unwrap();

    let output = render_secs(&mut engine, 0.1);
    assert_eq!(engine.live_voices(), 2);
    assert!(rms(&output) > 0.0);

    render_secs(&mut engine, 0.4);
    assert_eq!(engine.live_voices(), 0);
}

#[test]
fn overlapping_drum_hits_mix_additively() {
    let (mut engine, mut handle) = PlectraEngine::new(config());

    handle
        .trigger_percussive(PercussionParams::Kick(KickParams::default()))
        .unwrap();
    handle
        .trigger_percussive(PercussionParams::Tom(TomParams::default()))
        .unwrap();
    handle
        .trigger_percussive(PercussionParams::Hihat(HihatParams::default()))
        .unwrap();

    let output = render_secs(&mut engine, 0.05);
    assert_eq!(engine.live_voices(), 3);
    assert!(rms(&output) > 0.0);
    assert!(output.iter().all(|s| s.is_finite()));
}
