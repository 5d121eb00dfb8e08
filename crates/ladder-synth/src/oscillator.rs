//! Counter-driven oscillator bank.
//!
//! Oscillators here hold no phase of their own. Every slot reads the engine's
//! shared sample counter and derives its phase from its own period, so the
//! phase relationship between detuned slots depends only on elapsed time and
//! never drifts when notes change.

use ladder_core::cents_to_ratio;
use libm::{exp2, fabs, fmod};

/// Number of oscillator slots in the bank.
pub const OSCILLATOR_COUNT: usize = 4;

/// Shortest allowed oscillator period in samples.
pub const MIN_PERIOD: f64 = 2.0;

/// Slots quieter than this are not rendered.
pub const SILENT_VOLUME: f32 = 0.001;

/// Detune span in cents either side of center.
const DETUNE_CENTS: f64 = 50.0;

/// Oscillator waveform types
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// Triangle, centered with a quarter-period shift.
    Triangle,
    /// Rising sawtooth.
    #[default]
    Sawtooth,
    /// 50% duty square.
    Square,
    /// 20% duty pulse.
    Pulse,
}

impl Waveform {
    /// All waveforms in parameter order.
    pub const ALL: [Waveform; 4] = [
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::Square,
        Waveform::Pulse,
    ];

    /// Waveform for a parameter index, clamped to `0..=3`.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.clamp(0, 3) as usize]
    }

    /// Parameter index of this waveform.
    pub fn index(self) -> u8 {
        match self {
            Waveform::Triangle => 0,
            Waveform::Sawtooth => 1,
            Waveform::Square => 2,
            Waveform::Pulse => 3,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Square => "square",
            Waveform::Pulse => "pulse",
        }
    }

    /// Evaluate the waveform at `counter` samples for a given period.
    ///
    /// Output is in `[-1, 1]`. `period` must be positive.
    #[inline]
    pub fn generate(self, counter: f64, period: f64) -> f32 {
        match self {
            Waveform::Triangle => {
                let phase = fmod(counter + period * 0.25, period) / period;
                (4.0 * fabs(phase - 0.5) - 1.0) as f32
            }
            Waveform::Sawtooth => (2.0 * fmod(counter, period) / period - 1.0) as f32,
            Waveform::Square => {
                if fmod(counter, period) / period < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Pulse => {
                if fmod(counter, period) / period < 0.2 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Settings for one oscillator in the bank.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OscillatorSlot {
    /// Waveform
    pub waveform: Waveform,
    /// Mix level in `[0, 1]`
    pub volume: f32,
    /// Octave offset in `[-2, 2]`
    pub range: i8,
    /// Fine tune in `[0, 1]`, 0.5 is center, mapped to ±50 cents
    pub detune: f32,
}

impl Default for OscillatorSlot {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sawtooth,
            volume: 0.0,
            range: 0,
            detune: 0.5,
        }
    }
}

impl OscillatorSlot {
    /// Create a slot at center detune.
    pub const fn new(waveform: Waveform, volume: f32, range: i8) -> Self {
        Self {
            waveform,
            volume,
            range,
            detune: 0.5,
        }
    }

    /// Detune offset in cents, `-50` to `+50`.
    #[inline]
    pub fn detune_cents(&self) -> f64 {
        (f64::from(self.detune.clamp(0.0, 1.0)) - 0.5) * 2.0 * DETUNE_CENTS
    }

    /// Period for this slot given the bank's base period.
    ///
    /// Applies the octave range and, when `detuned`, the fine tune. The
    /// result never drops below [`MIN_PERIOD`].
    #[inline]
    pub fn effective_period(&self, base_period: f64, detuned: bool) -> f64 {
        let mut period = base_period;
        if self.range != 0 {
            period *= exp2(-f64::from(self.range));
        }
        if detuned {
            period /= cents_to_ratio(self.detune_cents());
        }
        period.max(MIN_PERIOD)
    }
}

/// Sum all audible slots at the given counter and base period.
///
/// Slot 0 is never detuned. Slots with volume below [`SILENT_VOLUME`] are
/// skipped.
#[inline]
pub fn mix(slots: &[OscillatorSlot; OSCILLATOR_COUNT], counter: f64, base_period: f64) -> f32 {
    let mut sum = 0.0;
    for (i, slot) in slots.iter().enumerate() {
        if slot.volume < SILENT_VOLUME {
            continue;
        }
        let period = slot.effective_period(base_period, i > 0);
        sum += slot.waveform.generate(counter, period) * slot.volume;
    }
    sum
}
