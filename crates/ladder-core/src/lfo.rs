//! Free-running sine LFO for pitch and cutoff modulation.

use core::f32::consts::TAU;
use libm::sinf;

/// Slowest LFO rate in Hz (rate parameter at `0.0`).
const MIN_RATE_HZ: f32 = 0.1;
/// Added to [`MIN_RATE_HZ`] at full rate travel.
const RATE_RANGE_HZ: f32 = 20.0;

/// Sine low-frequency oscillator.
///
/// The phase is never reset by note events, so modulation keeps running
/// across notes. The phase is advanced before the output is read.
///
/// # Example
///
/// ```rust
/// use ladder_core::Lfo;
///
/// let mut lfo = Lfo::new(44100.0);
/// lfo.set_rate(0.3); // ~1.9 Hz
///
/// let value = lfo.next(); // [-1.0, 1.0]
/// assert!(value.abs() <= 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lfo {
    /// Current phase position [0.0, 1.0)
    phase: f32,
    /// Phase increment per sample
    phase_inc: f32,
    sample_rate: f32,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl Lfo {
    /// Create an LFO at the slowest rate with phase 0.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: MIN_RATE_HZ / sample_rate,
            sample_rate,
        }
    }

    /// Map a normalized rate in `[0, 1]` to Hz: `0.1 + rate² * 20`.
    #[inline]
    pub fn rate_to_hz(rate: f32) -> f32 {
        MIN_RATE_HZ + rate * rate * RATE_RANGE_HZ
    }

    /// Set rate from a normalized `[0, 1]` value.
    #[inline]
    pub fn set_rate(&mut self, rate: f32) {
        self.phase_inc = Self::rate_to_hz(rate) / self.sample_rate;
    }

    /// Current phase (0.0 - 1.0)
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance one sample and return the new value (-1.0 to 1.0).
    #[inline]
    pub fn next(&mut self) -> f32 {
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        sinf(TAU * self.phase)
    }
}
