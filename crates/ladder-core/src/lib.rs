//! Ladder Core - DSP primitives for a monophonic subtractive synthesizer
//!
//! This crate provides the leaf building blocks of the ladder synth engine.
//! Everything here is fixed-size, allocation-free and safe to call from a
//! real-time audio thread.
//!
//! # Core Abstractions
//!
//! ## Filtering
//!
//! - [`LadderFilter`] - 4-pole resonant low-pass with a hard-limited last stage
//! - [`cutoff_to_hz`] - Exponential 20 Hz to 20 kHz cutoff mapping
//!
//! ## Modulation & Noise
//!
//! - [`Lfo`] - Free-running sine LFO with a quadratic rate curve
//! - [`NoiseSource`] - Linear-congruential white noise
//!
//! ## Parameters
//!
//! - [`ParameterInfo`] - Index-based parameter introspection
//! - [`ParamDescriptor`] / [`ParamFlags`] - Parameter metadata
//!
//! ## Utilities
//!
//! - Pitch and time conversions: [`note_to_hz`], [`hz_to_period`],
//!   [`time_param_to_samples`], [`semitones_to_ratio`], [`cents_to_ratio`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! ladder-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use ladder_core::{LadderFilter, Lfo, cutoff_to_hz};
//!
//! let sample_rate = 44100.0;
//! let mut filter = LadderFilter::new();
//! let mut lfo = Lfo::new(sample_rate);
//! lfo.set_rate(0.3);
//!
//! for _ in 0..64 {
//!     let wobble = lfo.next() * 0.1;
//!     let hz = cutoff_to_hz(0.5 + wobble);
//!     let _out = filter.process(1.0, hz, 0.4, sample_rate);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod filter;
pub mod lfo;
pub mod math;
pub mod noise;
pub mod param_info;

pub use filter::{LadderFilter, TAP_LIMIT, cutoff_to_hz};
pub use lfo::Lfo;
pub use math::{
    cents_to_ratio, hz_to_period, note_to_hz, semitones_to_ratio, time_param_to_samples,
};
pub use noise::NoiseSource;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
