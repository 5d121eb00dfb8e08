//! ADSR envelope generator with quadratic segments.
//!
//! Each segment is a quadratic curve over a fixed duration rather than an
//! exponential approach, so every stage ends exactly on time:
//!
//! ```text
//! attack:  level = anchor + (1 - anchor) * p²
//! decay:   level = sustain + (1 - sustain) * (1 - p)²
//! release: level = release_anchor * (1 - p)²
//! ```
//!
//! where `p = samples_in_state / segment_samples`. The attack starts from
//! the level captured at trigger time, so retriggering during a release does
//! not click.

use ladder_core::time_param_to_samples;

/// ADSR envelope states
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeState {
    /// Envelope is inactive. Output is zero.
    #[default]
    Off,
    /// Output rises from the attack anchor to 1.0.
    Attack,
    /// Output falls from 1.0 to the sustain level.
    Decay,
    /// Output holds at the sustain level while the gate is held.
    Sustain,
    /// Output falls from the release anchor to zero.
    Release,
}

/// Normalized ADSR settings shared by an envelope instance.
///
/// Attack, decay and release are `[0, 1]` controls mapped to
/// `0.001 + p² * 5` seconds. Sustain is a level in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdsrParams {
    /// Attack time control
    pub attack: f32,
    /// Decay time control
    pub decay: f32,
    /// Sustain level
    pub sustain: f32,
    /// Release time control
    pub release: f32,
}

impl AdsrParams {
    /// Create a parameter set.
    pub const fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }
}

/// ADSR state machine.
///
/// The envelope holds no parameters or sample rate of its own; both are
/// supplied on every [`advance`](Self::advance) call so that the amplitude
/// and filter envelopes can share one code path.
///
/// # Invariants
///
/// - `level` is always in `[0, 1]`
/// - `state == Off` implies `level == 0` after the next advance, and
///   immediately after [`reset`](Self::reset)
/// - the sample counter is `0` on entry to every state
///
/// # Example
///
/// ```rust
/// use ladder_synth::{AdsrParams, Envelope, EnvelopeState};
///
/// let params = AdsrParams::new(0.01, 0.3, 0.7, 0.2);
/// let mut env = Envelope::new();
/// env.trigger();
///
/// for _ in 0..1000 {
///     let level = env.advance(&params, 44100.0);
///     assert!((0.0..=1.0).contains(&level));
/// }
/// assert_eq!(env.state(), EnvelopeState::Decay);
///
/// env.release();
/// assert_eq!(env.state(), EnvelopeState::Release);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Envelope {
    state: EnvelopeState,
    level: f32,
    /// Level captured when the attack started
    attack_anchor: f32,
    /// Level captured when the release started
    release_anchor: f32,
    /// Samples elapsed in the current state
    counter: f64,
}

impl Envelope {
    /// Create an envelope in the `Off` state.
    pub const fn new() -> Self {
        Self {
            state: EnvelopeState::Off,
            level: 0.0,
            attack_anchor: 0.0,
            release_anchor: 0.0,
            counter: 0.0,
        }
    }

    /// Start the attack from the current level.
    pub fn trigger(&mut self) {
        self.attack_anchor = self.level;
        self.enter(EnvelopeState::Attack);
    }

    /// Start the release from the current level. Has no effect when `Off`.
    pub fn release(&mut self) {
        if self.state != EnvelopeState::Off {
            self.release_anchor = self.level;
            self.enter(EnvelopeState::Release);
        }
    }

    /// Force the envelope to `Off` at level zero.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current state.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Current level without advancing.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Samples spent in the current state.
    pub fn counter(&self) -> f64 {
        self.counter
    }

    /// Check if envelope is active (not `Off`).
    pub fn is_active(&self) -> bool {
        self.state != EnvelopeState::Off
    }

    #[inline]
    fn enter(&mut self, state: EnvelopeState) {
        self.state = state;
        self.counter = 0.0;
    }

    /// Advance envelope by one sample and return current level.
    #[inline]
    pub fn advance(&mut self, params: &AdsrParams, sample_rate: f32) -> f32 {
        let sustain = params.sustain.clamp(0.0, 1.0);

        match self.state {
            EnvelopeState::Off => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                let progress = self.progress(params.attack, sample_rate);
                if progress >= 1.0 {
                    self.level = 1.0;
                    self.enter(EnvelopeState::Decay);
                } else {
                    let anchor = self.attack_anchor.clamp(0.0, 1.0);
                    self.level = anchor + (1.0 - anchor) * progress * progress;
                    self.counter += 1.0;
                }
            }

            EnvelopeState::Decay => {
                let progress = self.progress(params.decay, sample_rate);
                if progress >= 1.0 {
                    self.level = sustain;
                    self.enter(EnvelopeState::Sustain);
                } else {
                    let remaining = 1.0 - progress;
                    self.level = sustain + (1.0 - sustain) * remaining * remaining;
                    self.counter += 1.0;
                }
            }

            EnvelopeState::Sustain => {
                self.level = sustain;
            }

            EnvelopeState::Release => {
                let progress = self.progress(params.release, sample_rate);
                if progress >= 1.0 {
                    self.level = 0.0;
                    self.enter(EnvelopeState::Off);
                } else {
                    let remaining = 1.0 - progress;
                    self.level = self.release_anchor.clamp(0.0, 1.0) * remaining * remaining;
                    self.counter += 1.0;
                }
            }
        }

        self.level
    }

    /// Elapsed fraction of a segment, clamped to at least one sample long.
    #[inline]
    fn progress(&self, time_param: f32, sample_rate: f32) -> f32 {
        let segment = f64::from(time_param_to_samples(time_param, sample_rate)).max(1.0);
        (self.counter / segment) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44100.0;

    fn fast() -> AdsrParams {
        AdsrParams::new(0.01, 0.05, 0.5, 0.05)
    }

    fn run_until(env: &mut Envelope, params: &AdsrParams, state: EnvelopeState, max: usize) -> usize {
        for i in 0..max {
            if env.state() == state {
                return i;
            }
            env.advance(params, SR);
        }
        panic!("envelope never reached {state:?}, stuck in {:?}", env.state());
    }

    #[test]
    fn test_envelope_off_state() {
        let mut env = Envelope::new();
        assert_eq!(env.state(), EnvelopeState::Off);
        for _ in 0..100 {
            assert_eq!(env.advance(&fast(), SR), 0.0);
        }
    }

    #[test]
    fn test_attack_duration_matches_time_curve() {
        let params = fast();
        let mut env = Envelope::new();
        env.trigger();
        let samples = run_until(&mut env, &params, EnvelopeState::Decay, 100_000);
        let expected = time_param_to_samples(params.attack, SR).ceil() as usize + 1;
        assert_eq!(samples, expected, "attack should take ceil(segment) + 1 advances");
        assert_eq!(env.level(), 1.0);
        assert_eq!(env.counter(), 0.0, "counter resets on state entry");
    }

    #[test]
    fn test_attack_curve_is_quadratic() {
        let params = AdsrParams::new(0.1, 0.5, 0.5, 0.5);
        let segment = time_param_to_samples(0.1, SR);
        let mut env = Envelope::new();
        env.trigger();
        let half = (segment / 2.0) as usize;
        let mut level = 0.0;
        for _ in 0..=half {
            level = env.advance(&params, SR);
        }
        let p = half as f32 / segment;
        assert!((level - p * p).abs() < 1e-4, "expected {}, got {}", p * p, level);
    }

    #[test]
    fn test_decay_to_sustain() {
        let params = fast();
        let mut env = Envelope::new();
        env.trigger();
        run_until(&mut env, &params, EnvelopeState::Sustain, 100_000);
        assert_eq!(env.level(), 0.5);
        for _ in 0..1000 {
            assert_eq!(env.advance(&params, SR), 0.5);
        }
        assert_eq!(env.counter(), 0.0, "sustain does not count");
    }

    #[test]
    fn test_sustain_follows_parameter_changes() {
        let mut params = fast();
        let mut env = Envelope::new();
        env.trigger();
        run_until(&mut env, &params, EnvelopeState::Sustain, 100_000);
        params.sustain = 0.25;
        assert_eq!(env.advance(&params, SR), 0.25);
    }

    #[test]
    fn test_release_from_sustain() {
        let params = fast();
        let mut env = Envelope::new();
        env.trigger();
        run_until(&mut env, &params, EnvelopeState::Sustain, 100_000);

        env.release();
        assert_eq!(env.state(), EnvelopeState::Release);
        let first = env.advance(&params, SR);
        assert!((first - 0.5).abs() < 1e-6, "release starts at the anchor, got {first}");

        run_until(&mut env, &params, EnvelopeState::Off, 100_000);
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn test_release_when_off_is_ignored() {
        let mut env = Envelope::new();
        env.release();
        assert_eq!(env.state(), EnvelopeState::Off);
    }

    #[test]
    fn test_retrigger_during_release_starts_from_current_level() {
        let params = fast();
        let mut env = Envelope::new();
        env.trigger();
        run_until(&mut env, &params, EnvelopeState::Sustain, 100_000);
        env.release();
        for _ in 0..200 {
            env.advance(&params, SR);
        }
        let before = env.level();
        assert!(before > 0.0 && before < 0.5);

        env.trigger();
        let after = env.advance(&params, SR);
        assert!(
            (after - before).abs() < 1e-6,
            "attack should start from {before}, got {after}"
        );
    }

    #[test]
    fn test_level_stays_in_range_with_extreme_sustain() {
        let params = AdsrParams::new(0.0, 0.0, 7.0, 0.0);
        let mut env = Envelope::new();
        env.trigger();
        for _ in 0..1000 {
            let level = env.advance(&params, SR);
            assert!((0.0..=1.0).contains(&level), "level out of range: {level}");
        }
    }

    #[test]
    fn test_reset() {
        let mut env = Envelope::new();
        env.trigger();
        env.advance(&fast(), SR);
        env.reset();
        assert_eq!(env, Envelope::new());
        assert!(!env.is_active());
    }
}
