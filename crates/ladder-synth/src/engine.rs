//! The synth engine: one monophonic voice and its render loop.

use crate::envelope::{Envelope, EnvelopeState};
use crate::oscillator;
use crate::params::{EngineParams, PARAM_COUNT, Param};
use crate::voice::{GLIDE_THRESHOLD, Glide, NoteOff, NoteOn, VoiceManager};
use ladder_core::{
    LadderFilter, Lfo, NoiseSource, ParamDescriptor, ParameterInfo, cutoff_to_hz,
    semitones_to_ratio,
};
use libm::exp2;

/// Sample rate used by [`Engine::default`].
pub const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

/// Most frames written by a single [`Engine::render`] call.
pub const MAX_BLOCK_SIZE: usize = 256;

/// Pitch modulation smaller than this (in LFO units) is skipped.
const PITCH_MOD_EPSILON: f32 = 0.0001;

/// LFO pitch swing in semitones at full depth.
const LFO_PITCH_SEMITONES: f32 = 2.0;

/// Attenuation of LFO cutoff modulation.
const LFO_FILTER_SCALE: f32 = 0.3;

/// Key-tracking reference note.
const KEY_TRACK_CENTER: f32 = 60.0;

/// Monophonic subtractive synthesizer.
///
/// Owns every piece of synth state: parameters, the voice (key stack, gate,
/// glide), both envelopes, the ladder filter, the LFO, the noise source and
/// the shared oscillator sample counter. Event methods mutate state
/// immediately; [`render`](Self::render) applies it sample by sample.
///
/// No method allocates, blocks or fails.
///
/// # Example
///
/// ```rust
/// use ladder_synth::{Engine, MAX_BLOCK_SIZE};
///
/// let mut engine = Engine::new(44100.0);
/// engine.note_on(60, 1.0);
///
/// let mut block = [0.0f32; MAX_BLOCK_SIZE];
/// let written = engine.render(&mut block);
/// assert_eq!(written, MAX_BLOCK_SIZE);
///
/// engine.note_off(60);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    /// Sound settings. Written directly or through [`ParameterInfo`].
    pub params: EngineParams,
    sample_rate: f32,
    voice: VoiceManager,
    amp_env: Envelope,
    filter_env: Envelope,
    filter: LadderFilter,
    lfo: Lfo,
    noise: NoiseSource,
    /// Shared oscillator phase counter in samples
    counter: f64,
    pitch_bend: f32,
    mod_wheel: f32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl Engine {
    /// Create an initialized engine at the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            params: EngineParams::default(),
            sample_rate,
            voice: VoiceManager::new(sample_rate),
            amp_env: Envelope::new(),
            filter_env: Envelope::new(),
            filter: LadderFilter::new(),
            lfo: Lfo::new(sample_rate),
            noise: NoiseSource::new(),
            counter: 0.0,
            pitch_bend: 0.0,
            mod_wheel: 0.0,
        }
    }

    /// Zero all state and restore default parameters, tuned to middle C.
    pub fn initialize(&mut self) {
        *self = Self::new(self.sample_rate);
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate = self.sample_rate, "engine initialized");
    }

    /// Hard stop: clear gate, envelopes, filter memory, held keys and the
    /// phase counter. Parameters, pitch, LFO and controllers are kept.
    pub fn reset(&mut self) {
        self.voice.reset();
        self.amp_env.reset();
        self.filter_env.reset();
        self.filter.reset();
        self.counter = 0.0;
        #[cfg(feature = "tracing")]
        tracing::debug!("engine reset");
    }

    /// Press a key. `velocity` is clamped to `[0, 1]`.
    ///
    /// The key is held as given; only the sounding pitch is clamped to
    /// `0..=127` after octave transpose.
    ///
    /// Starting from a closed gate, both envelopes retrigger from their
    /// current levels. With the gate already open this is a legato change:
    /// only the pitch moves.
    pub fn note_on(&mut self, note: u8, velocity: f32) {
        let outcome = self
            .voice
            .note_on(note, velocity, self.params.octave_transpose, self.glide_enabled());
        if outcome == NoteOn::Trigger {
            self.amp_env.trigger();
            self.filter_env.trigger();
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(note, velocity, ?outcome, "note on");
    }

    /// Release a key.
    ///
    /// If other keys are held the most recent one sounds again; releasing
    /// the last key sends both envelopes into release.
    pub fn note_off(&mut self, note: u8) {
        let outcome = self
            .voice
            .note_off(note, self.params.octave_transpose, self.glide_enabled());
        if outcome == NoteOff::Release {
            self.amp_env.release();
            self.filter_env.release();
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(note, ?outcome, "note off");
    }

    /// Set pitch bend, clamped to `[-1, 1]`.
    pub fn pitch_bend(&mut self, value: f32) {
        self.pitch_bend = value.clamp(-1.0, 1.0);
    }

    /// Set mod wheel, clamped to `[0, 1]`.
    pub fn mod_wheel(&mut self, value: f32) {
        self.mod_wheel = value.clamp(0.0, 1.0);
    }

    /// Silence immediately: drop held keys, close the gate and force both
    /// envelopes to `Off` without a release tail.
    pub fn all_notes_off(&mut self) {
        self.voice.reset();
        self.amp_env.reset();
        self.filter_env.reset();
        #[cfg(feature = "tracing")]
        tracing::debug!("all notes off");
    }

    /// Render mono samples into `output`.
    ///
    /// At most [`MAX_BLOCK_SIZE`] frames are written per call; the rest of
    /// `output` is left untouched. Returns the number of frames written.
    pub fn render(&mut self, output: &mut [f32]) -> usize {
        let frames = output.len().min(MAX_BLOCK_SIZE);
        if frames == 0 {
            return 0;
        }

        let sr = self.sample_rate;
        let p = &self.params;

        let bend_semitones = self.pitch_bend * p.bend_range * 12.0;
        let bend_ratio = exp2(f64::from(bend_semitones) / 12.0);
        let glide_rate = Glide::rate(p.glide, sr, frames);
        self.lfo.set_rate(p.lfo_rate);

        let sensitivity = p.velocity_sensitivity;
        let velocity_gain = 1.0 - sensitivity + sensitivity * self.voice.velocity();
        let key_track = self.voice.current_note().map_or(0.0, |note| {
            (f32::from(note) - KEY_TRACK_CENTER) / 127.0 * p.key_follow
        });
        let pitch_depth = p.lfo_pitch_depth * p.mod_to_pitch * self.mod_wheel;
        let filter_depth = p.lfo_filter_depth * p.mod_to_filter * LFO_FILTER_SCALE;

        for out in &mut output[..frames] {
            let mut period = self.voice.glide_mut().tick(glide_rate) / bend_ratio;

            let lfo = self.lfo.next();
            let pitch_mod = lfo * pitch_depth;
            if pitch_mod.abs() > PITCH_MOD_EPSILON {
                period /= f64::from(semitones_to_ratio(pitch_mod * LFO_PITCH_SEMITONES));
            }

            let amp = self.amp_env.advance(&p.amp_env, sr);
            let contour = self.filter_env.advance(&p.filter_env, sr);

            let mut sample = oscillator::mix(&p.oscillators, self.counter, period);
            if p.noise_volume > oscillator::SILENT_VOLUME {
                sample += self.noise.next() * p.noise_volume;
            }
            sample *= amp * velocity_gain;

            let cutoff = (p.cutoff + contour * p.contour + key_track + lfo * filter_depth).clamp(0.0, 1.0);
            sample = self.filter.process(sample, cutoff_to_hz(cutoff), p.resonance, sr);

            *out = sample * p.master_volume;
            self.counter += 1.0;
        }

        frames
    }

    fn glide_enabled(&self) -> bool {
        self.params.glide > GLIDE_THRESHOLD
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Voice state: held keys, gate, pitch.
    pub fn voice(&self) -> &VoiceManager {
        &self.voice
    }

    /// Amplitude envelope
    pub fn amp_envelope(&self) -> &Envelope {
        &self.amp_env
    }

    /// Filter envelope
    pub fn filter_envelope(&self) -> &Envelope {
        &self.filter_env
    }

    /// Ladder filter state
    pub fn filter(&self) -> &LadderFilter {
        &self.filter
    }

    /// Shared oscillator phase counter in samples.
    pub fn counter(&self) -> f64 {
        self.counter
    }

    /// Current pitch bend, `[-1, 1]`.
    pub fn pitch_bend_value(&self) -> f32 {
        self.pitch_bend
    }

    /// Current mod wheel, `[0, 1]`.
    pub fn mod_wheel_value(&self) -> f32 {
        self.mod_wheel
    }

    /// Returns `true` while the voice is producing sound (gate held or
    /// amplitude envelope still releasing).
    pub fn is_sounding(&self) -> bool {
        self.voice.is_gated() || self.amp_env.state() != EnvelopeState::Off
    }
}

impl ParameterInfo for Engine {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        Param::from_index(index).map(Param::descriptor)
    }

    fn get_param(&self, index: usize) -> f32 {
        Param::from_index(index).map_or(0.0, |p| self.params.get(p))
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if let Some(p) = Param::from_index(index) {
            self.params.set(p, value);
        }
    }
}
