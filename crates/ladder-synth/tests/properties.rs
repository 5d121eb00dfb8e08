//! Property-based tests for ladder-synth.
//!
//! Envelope level bounds under arbitrary gate sequences, key stack ordering,
//! and engine output bounds for arbitrary parameter settings.

use ladder_synth::{
    AdsrParams, Engine, Envelope, EnvelopeState, KEY_STACK_CAPACITY, KeyStack, MAX_BLOCK_SIZE,
    PARAM_COUNT, ParameterInfo,
};
use proptest::prelude::*;

const SR: f32 = 8000.0;

#[derive(Debug, Clone, Copy)]
enum Gate {
    Trigger,
    Release,
    Run(u16),
}

fn gate_strategy() -> impl Strategy<Value = Gate> {
    prop_oneof![
        Just(Gate::Trigger),
        Just(Gate::Release),
        (1u16..2000).prop_map(Gate::Run),
    ]
}

fn adsr_strategy() -> impl Strategy<Value = AdsrParams> {
    (0.0f32..=0.3, 0.0f32..=0.3, 0.0f32..=1.0, 0.0f32..=0.3)
        .prop_map(|(a, d, s, r)| AdsrParams::new(a, d, s, r))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Level stays in [0, 1] and `Off` always means silence.
    #[test]
    fn envelope_level_is_bounded(
        params in adsr_strategy(),
        gates in prop::collection::vec(gate_strategy(), 1..24),
    ) {
        let mut env = Envelope::new();
        for gate in gates {
            match gate {
                Gate::Trigger => env.trigger(),
                Gate::Release => env.release(),
                Gate::Run(samples) => {
                    for _ in 0..samples {
                        let level = env.advance(&params, SR);
                        prop_assert!((0.0..=1.0).contains(&level), "level {}", level);
                        if env.state() == EnvelopeState::Off {
                            prop_assert_eq!(env.level(), 0.0);
                        }
                    }
                }
            }
        }
    }

    /// The top of the stack is the latest pushed note still held.
    #[test]
    fn key_stack_keeps_last_note_priority(
        pushes in prop::collection::vec(0u8..=127, 1..40),
        release in 0u8..=127,
    ) {
        let mut stack = KeyStack::new();
        let mut model: Vec<u8> = Vec::new();
        for &note in &pushes {
            stack.push(note);
            model.retain(|&k| k != note);
            model.push(note);
            if model.len() > KEY_STACK_CAPACITY {
                model.remove(0);
            }
        }
        prop_assert_eq!(stack.as_slice(), model.as_slice());

        let held = model.contains(&release);
        prop_assert_eq!(stack.remove(release), held);
        model.retain(|&k| k != release);
        prop_assert_eq!(stack.as_slice(), model.as_slice());
        prop_assert_eq!(stack.top(), model.last().copied());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Any parameter table setting renders finite, bounded audio.
    #[test]
    fn engine_output_is_finite_for_any_settings(
        values in prop::collection::vec(-1.0f32..=2.0, PARAM_COUNT),
        note in 0u8..=127,
        bend in -1.0f32..=1.0,
        wheel in 0.0f32..=1.0,
    ) {
        let mut engine = Engine::new(SR);
        for (index, &value) in values.iter().enumerate() {
            engine.set_param(index, value);
        }
        engine.pitch_bend(bend);
        engine.mod_wheel(wheel);
        engine.note_on(note, 1.0);

        let mut block = [0.0f32; MAX_BLOCK_SIZE];
        for _ in 0..16 {
            engine.render(&mut block);
            for &s in &block {
                prop_assert!(s.is_finite());
                prop_assert!(s.abs() <= 4.0 * engine.params.master_volume + 1e-3, "sample {}", s);
            }
        }
    }
}
