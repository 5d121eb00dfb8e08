//! Pitch and time conversions for the synth engine.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Pitch
//!
//! - [`note_to_hz`] - MIDI note number to frequency (equal temperament)
//! - [`hz_to_period`] - Frequency to oscillator period in samples
//! - [`semitones_to_ratio`] / [`cents_to_ratio`] - Interval to frequency ratio
//!
//! # Time
//!
//! - [`time_param_to_samples`] - Normalized envelope time to a sample count

use libm::{exp2, exp2f, pow};

/// Frequency of MIDI note 0 (C-1) in Hz.
const NOTE_ZERO_HZ: f64 = 8.1758;

/// Twelfth root of two.
const SEMITONE_RATIO: f64 = 1.0594630943593;

/// Shortest envelope segment in seconds.
const MIN_SEGMENT_SECONDS: f32 = 0.001;

/// Added to [`MIN_SEGMENT_SECONDS`] at full parameter travel.
const SEGMENT_RANGE_SECONDS: f32 = 5.0;

/// Convert a MIDI note number to frequency in Hz.
///
/// Note 69 is A4 at ~440 Hz, note 60 is middle C at ~261.6 Hz.
///
/// # Example
/// ```rust
/// use ladder_core::note_to_hz;
///
/// assert!((note_to_hz(69.0) - 440.0).abs() < 0.01);
/// assert!((note_to_hz(72.0) / note_to_hz(60.0) - 2.0).abs() < 1e-9);
/// ```
#[inline]
pub fn note_to_hz(note: f64) -> f64 {
    NOTE_ZERO_HZ * pow(SEMITONE_RATIO, note)
}

/// Convert a frequency to an oscillator period in samples.
///
/// Frequencies below 1 Hz are treated as 1 Hz, so the period never exceeds
/// one second of samples and never divides by zero.
///
/// # Arguments
/// * `hz` - Frequency in Hz
/// * `sample_rate` - Sample rate in Hz
#[inline]
pub fn hz_to_period(hz: f64, sample_rate: f64) -> f64 {
    if hz < 1.0 { sample_rate } else { sample_rate / hz }
}

/// Map a normalized `[0, 1]` envelope time to a sample count.
///
/// The curve is `0.001 + param² * 5.0` seconds: about 1 ms at zero and a
/// little over 5 s at full travel, with most resolution at short times.
///
/// # Example
/// ```rust
/// use ladder_core::time_param_to_samples;
///
/// assert!((time_param_to_samples(0.0, 44100.0) - 44.1).abs() < 0.01);
/// assert!((time_param_to_samples(1.0, 1000.0) - 5001.0).abs() < 0.01);
/// ```
#[inline]
pub fn time_param_to_samples(param: f32, sample_rate: f32) -> f32 {
    (MIN_SEGMENT_SECONDS + param * param * SEGMENT_RANGE_SECONDS) * sample_rate
}

/// Convert an interval in semitones to a frequency ratio.
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    exp2f(semitones / 12.0)
}

/// Convert an interval in cents to a frequency ratio, in double precision.
///
/// Used for oscillator detune, which is applied to `f64` periods.
#[inline]
pub fn cents_to_ratio(cents: f64) -> f64 {
    exp2(cents / 1200.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_to_hz_reference_pitches() {
        assert!((note_to_hz(69.0) - 440.0).abs() < 0.01, "A4 should be 440 Hz");
        assert!(
            (note_to_hz(60.0) - 261.6256).abs() < 0.01,
            "Middle C should be ~261.63 Hz, got {}",
            note_to_hz(60.0)
        );
        assert!((note_to_hz(0.0) - 8.1758).abs() < 1e-9);
    }

    #[test]
    fn test_note_to_hz_is_monotonic() {
        let mut prev = note_to_hz(0.0);
        for n in 1..=127 {
            let hz = note_to_hz(f64::from(n));
            assert!(hz > prev, "note {n} should be higher than note {}", n - 1);
            prev = hz;
        }
    }

    #[test]
    fn test_hz_to_period() {
        assert_eq!(hz_to_period(441.0, 44100.0), 100.0);
        assert_eq!(hz_to_period(0.5, 44100.0), 44100.0);
        assert_eq!(hz_to_period(0.0, 44100.0), 44100.0);
    }

    #[test]
    fn test_time_param_curve() {
        let sr = 44100.0;
        let short = time_param_to_samples(0.1, sr);
        let long = time_param_to_samples(0.9, sr);
        assert!(short < long);
        // 0.3 -> 0.001 + 0.45 s
        assert!((time_param_to_samples(0.3, sr) - 0.451 * sr).abs() < 0.5);
    }

    #[test]
    fn test_interval_ratios() {
        assert!((semitones_to_ratio(12.0) - 2.0).abs() < 1e-6);
        assert!((semitones_to_ratio(-12.0) - 0.5).abs() < 1e-6);
        assert!((semitones_to_ratio(0.0) - 1.0).abs() < 1e-6);
        assert!((cents_to_ratio(1200.0) - 2.0).abs() < 1e-12);
        assert!((cents_to_ratio(-50.0) - 0.971_532_1).abs() < 1e-6);
    }
}
