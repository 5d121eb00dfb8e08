//! Monophonic voice management: last-note priority, legato and glide.

use crate::key_stack::KeyStack;
use ladder_core::{hz_to_period, note_to_hz};

/// Glide amounts at or below this apply pitch changes immediately.
pub const GLIDE_THRESHOLD: f32 = 0.001;

/// Glide slew stops once the period is this close to the target.
const GLIDE_SETTLE: f64 = 0.01;

/// Highest MIDI note number.
pub const MAX_NOTE: u8 = 127;

/// Note the engine is tuned to before the first key press.
pub const MIDDLE_C: u8 = 60;

/// Sounding and target oscillator periods (portamento).
///
/// The period moves toward the target by a fixed fraction each sample,
/// an exponential slew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glide {
    period: f64,
    target: f64,
}

impl Glide {
    /// Start settled at `period`.
    pub const fn new(period: f64) -> Self {
        Self {
            period,
            target: period,
        }
    }

    /// Per-sample slew fraction for a block.
    ///
    /// `1 / (1 + glide² * 2 * sample_rate / frames)` when `glide` exceeds
    /// [`GLIDE_THRESHOLD`], otherwise `1.0`. Longer blocks slew faster per
    /// sample.
    pub fn rate(glide: f32, sample_rate: f32, frames: usize) -> f64 {
        if glide > GLIDE_THRESHOLD {
            let glide = f64::from(glide);
            let glide_samples = glide * glide * 2.0 * f64::from(sample_rate);
            1.0 / (1.0 + glide_samples / frames.max(1) as f64)
        } else {
            1.0
        }
    }

    /// Set both period and target.
    pub fn jump_to(&mut self, period: f64) {
        self.period = period;
        self.target = period;
    }

    /// Set only the target; the period follows during [`tick`](Self::tick).
    pub fn set_target(&mut self, period: f64) {
        self.target = period;
    }

    /// Move one sample toward the target and return the sounding period.
    #[inline]
    pub fn tick(&mut self, rate: f64) -> f64 {
        let diff = self.target - self.period;
        if diff.abs() > GLIDE_SETTLE {
            self.period += diff * rate;
        }
        self.period
    }

    /// Sounding period in samples
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Target period in samples
    pub fn target(&self) -> f64 {
        self.target
    }
}

/// Result of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteOn {
    /// The gate opened: envelopes must retrigger.
    Trigger,
    /// The gate was already open: pitch changed, envelopes continue.
    Legato,
}

/// Result of a key release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteOff {
    /// Keys are still held; pitch moved to this note.
    Retarget(u8),
    /// The last key was released and the gate closed: envelopes must release.
    Release,
    /// Nothing was held, nothing changed.
    Ignored,
}

/// Key stack, gate and pitch state for a single voice.
///
/// The voice manager decides what a key event means for the voice and
/// reports it as a [`NoteOn`] or [`NoteOff`]. The caller owns the envelopes
/// and acts on the result.
///
/// # Example
///
/// ```rust
/// use ladder_synth::{NoteOff, NoteOn, VoiceManager};
///
/// let mut voice = VoiceManager::new(44100.0);
/// assert_eq!(voice.note_on(60, 1.0, 0, false), NoteOn::Trigger);
/// assert_eq!(voice.note_on(64, 1.0, 0, false), NoteOn::Legato);
/// assert_eq!(voice.note_off(64, 0, false), NoteOff::Retarget(60));
/// assert_eq!(voice.note_off(60, 0, false), NoteOff::Release);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceManager {
    keys: KeyStack,
    gate: bool,
    /// Untransposed note that is sounding
    current_note: Option<u8>,
    velocity: f32,
    glide: Glide,
    sample_rate: f64,
}

impl VoiceManager {
    /// Create an idle voice tuned to middle C.
    pub fn new(sample_rate: f32) -> Self {
        let sample_rate = f64::from(sample_rate);
        Self {
            keys: KeyStack::new(),
            gate: false,
            current_note: None,
            velocity: 1.0,
            glide: Glide::new(note_period(MIDDLE_C, 0, sample_rate)),
            sample_rate,
        }
    }

    /// Press a key.
    ///
    /// The note goes on top of the key stack and becomes the sounding note.
    /// With the gate already open and `glide` set, only the glide target
    /// moves; otherwise the pitch jumps.
    pub fn note_on(&mut self, note: u8, velocity: f32, octave_transpose: i8, glide: bool) -> NoteOn {
        self.keys.push(note);
        let period = note_period(note, octave_transpose, self.sample_rate);
        self.current_note = Some(note);
        self.velocity = velocity.clamp(0.0, 1.0);

        if self.gate {
            self.move_pitch(period, glide);
            NoteOn::Legato
        } else {
            self.glide.jump_to(period);
            self.gate = true;
            NoteOn::Trigger
        }
    }

    /// Release a key.
    ///
    /// If other keys are still held, the most recent one sounds again.
    pub fn note_off(&mut self, note: u8, octave_transpose: i8, glide: bool) -> NoteOff {
        self.keys.remove(note);

        if let Some(top) = self.keys.top() {
            self.current_note = Some(top);
            self.move_pitch(note_period(top, octave_transpose, self.sample_rate), glide);
            NoteOff::Retarget(top)
        } else if self.gate {
            self.gate = false;
            NoteOff::Release
        } else {
            NoteOff::Ignored
        }
    }

    /// Drop all keys and close the gate. Pitch is left where it is.
    pub fn reset(&mut self) {
        self.keys.clear();
        self.gate = false;
        self.current_note = None;
    }

    fn move_pitch(&mut self, period: f64, glide: bool) {
        if glide {
            self.glide.set_target(period);
        } else {
            self.glide.jump_to(period);
        }
    }

    /// Held keys
    pub fn keys(&self) -> &KeyStack {
        &self.keys
    }

    /// Returns `true` while any key is held.
    pub fn is_gated(&self) -> bool {
        self.gate
    }

    /// Sounding note before octave transpose, if any.
    pub fn current_note(&self) -> Option<u8> {
        self.current_note
    }

    /// Velocity of the most recent key press, `[0, 1]`.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Pitch state
    pub fn glide(&self) -> &Glide {
        &self.glide
    }

    /// Mutable pitch state, advanced by the render loop.
    pub fn glide_mut(&mut self) -> &mut Glide {
        &mut self.glide
    }
}

/// Oscillator period for a note after octave transpose.
///
/// The transposed note is clamped to `0..=127`.
pub fn note_period(note: u8, octave_transpose: i8, sample_rate: f64) -> f64 {
    let effective = (i32::from(note) + i32::from(octave_transpose) * 12).clamp(0, i32::from(MAX_NOTE));
    hz_to_period(note_to_hz(f64::from(effective)), sample_rate)
}
