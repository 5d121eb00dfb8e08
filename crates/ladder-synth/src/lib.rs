//! Ladder Synth - Monophonic subtractive synthesizer engine
//!
//! Builds a complete single-voice synth on top of the primitives in
//! [`ladder_core`]: four oscillators sharing one phase counter, noise, a
//! resonant ladder low-pass, two ADSR envelopes, an LFO, glide and
//! last-note-priority key handling.
//!
//! # Core Components
//!
//! ## Engine
//!
//! - [`Engine`] - Owns all synth state and renders mono blocks of up to
//!   [`MAX_BLOCK_SIZE`] frames
//! - [`MidiMessage`] - Raw channel-message decoding, applied with
//!   [`Engine::handle_midi`]
//!
//! ## Parameters
//!
//! - [`EngineParams`] - Every sound setting as a plain struct
//! - [`Param`] - Stable key/index table, exposed through
//!   [`ParameterInfo`](ladder_core::ParameterInfo)
//!
//! ## Building Blocks
//!
//! - [`Envelope`] / [`AdsrParams`] / [`EnvelopeState`] - Quadratic ADSR
//! - [`OscillatorSlot`] / [`Waveform`] - Counter-driven naive oscillators
//! - [`KeyStack`] - Bounded held-key stack
//! - [`VoiceManager`] / [`Glide`] - Gate, note priority and portamento
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! ladder-synth = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use ladder_synth::{Engine, MAX_BLOCK_SIZE, Param};
//!
//! let mut engine = Engine::new(48000.0);
//! engine.params.set(Param::Cutoff, 0.4);
//! engine.params.set(Param::Resonance, 0.6);
//!
//! engine.handle_midi(&[0x90, 45, 100]);
//!
//! let mut block = [0.0f32; MAX_BLOCK_SIZE];
//! for _ in 0..16 {
//!     engine.render(&mut block);
//! }
//!
//! engine.handle_midi(&[0x80, 45, 0]);
//! assert!(block.iter().any(|&s| s != 0.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod engine;
pub mod envelope;
pub mod key_stack;
pub mod midi;
pub mod oscillator;
pub mod params;
pub mod voice;

pub use engine::{DEFAULT_SAMPLE_RATE, Engine, MAX_BLOCK_SIZE};
pub use envelope::{AdsrParams, Envelope, EnvelopeState};
pub use key_stack::{KEY_STACK_CAPACITY, KeyStack};
pub use midi::MidiMessage;
pub use oscillator::{OSCILLATOR_COUNT, OscillatorSlot, Waveform};
pub use params::{EngineParams, PARAM_COUNT, Param};
pub use voice::{Glide, NoteOff, NoteOn, VoiceManager};

// Re-export the core primitives so downstream crates need one dependency.
pub use ladder_core::{
    LadderFilter, Lfo, NoiseSource, ParamDescriptor, ParamFlags, ParamId, ParamUnit,
    ParameterInfo,
};
