//! Four-pole resonant ladder low-pass filter.
//!
//! A cascade of four one-pole stages with feedback from the last stage to
//! the input. Each stage has the difference equation:
//!
//! ```text
//! y_k[n] = x_k[n] + 0.3 * x_k[n-1] + (1 - f) * y_k[n-1]
//! ```
//!
//! where `f = 1.16 * cutoff_hz / sample_rate`. The input is pre-scaled by
//! `0.35013 * f^4` so that DC gain through the cascade stays near unity, and
//! resonance feeds `tap4 * resonance * (1 - 0.15 f²)` back into the input.
//!
//! Coefficients are computed on every call because the cutoff is modulated
//! per sample by the filter envelope, key tracking and the LFO.
//!
//! # Usage
//!
//! ```rust
//! use ladder_core::{LadderFilter, cutoff_to_hz};
//!
//! let mut lp = LadderFilter::new();
//! let hz = cutoff_to_hz(0.7);
//! let out = lp.process(1.0, hz, 0.2, 44100.0);
//! assert!(out.abs() < 1.0);
//! ```

use libm::powf;

/// Limit applied to the last ladder stage on every sample.
pub const TAP_LIMIT: f32 = 4.0;

/// Normalized cutoff range (fraction of the sample rate).
const MIN_CUTOFF_FRACTION: f32 = 0.001;
const MAX_CUTOFF_FRACTION: f32 = 0.49;

/// Map a normalized cutoff in `[0, 1]` to Hz on an exponential curve.
///
/// `0.0` maps to 20 Hz, `1.0` to 20 kHz. Inputs outside `[0, 1]` are
/// clamped first.
///
/// # Example
/// ```rust
/// use ladder_core::cutoff_to_hz;
///
/// assert!((cutoff_to_hz(0.0) - 20.0).abs() < 1e-3);
/// assert!((cutoff_to_hz(1.0) - 20000.0).abs() < 1.0);
/// ```
#[inline]
pub fn cutoff_to_hz(normalized: f32) -> f32 {
    20.0 * powf(1000.0, normalized.clamp(0.0, 1.0))
}

/// Moog-style 4-pole ladder filter.
///
/// # Invariants
///
/// - `taps[4]` is always within `±TAP_LIMIT` after [`process`](Self::process)
/// - normalized cutoff is clamped to `[0.001, 0.49]` of the sample rate
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LadderFilter {
    /// `[input history, stage 1, stage 2, stage 3, stage 4]`
    taps: [f32; 5],
}

impl LadderFilter {
    /// Create a filter with zeroed state.
    pub const fn new() -> Self {
        Self { taps: [0.0; 5] }
    }

    /// Filter one sample.
    ///
    /// # Arguments
    ///
    /// * `input` - Input sample
    /// * `cutoff_hz` - Cutoff frequency in Hz
    /// * `resonance` - Feedback amount, `0.0` to `1.0`
    /// * `sample_rate` - Sample rate in Hz
    #[inline]
    pub fn process(&mut self, input: f32, cutoff_hz: f32, resonance: f32, sample_rate: f32) -> f32 {
        let fc = (cutoff_hz / sample_rate).clamp(MIN_CUTOFF_FRACTION, MAX_CUTOFF_FRACTION);
        let f = fc * 1.16;
        let fb = resonance * (1.0 - 0.15 * f * f);
        let damp = 1.0 - f;

        let t = &mut self.taps;
        let mut x = input - t[4] * fb;
        x *= 0.35013 * (f * f) * (f * f);

        t[1] = x + 0.3 * t[0] + damp * t[1];
        t[0] = x;
        t[2] = t[1] + 0.3 * t[1] + damp * t[2];
        t[3] = t[2] + 0.3 * t[2] + damp * t[3];
        t[4] = (t[3] + 0.3 * t[3] + damp * t[4]).clamp(-TAP_LIMIT, TAP_LIMIT);

        t[4]
    }

    /// Zero all filter memory.
    pub fn reset(&mut self) {
        self.taps = [0.0; 5];
    }

    /// Current tap values, input history first.
    pub fn taps(&self) -> &[f32; 5] {
        &self.taps
    }
}
