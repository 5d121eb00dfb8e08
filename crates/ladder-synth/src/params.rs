//! Engine parameters and their descriptor table.
//!
//! [`EngineParams`] holds every user-facing setting of the synth. Each
//! setting is also reachable by index through [`Param`] and the
//! [`ParameterInfo`](ladder_core::ParameterInfo) impl on
//! [`Engine`](crate::Engine), which is how patches, hosts and the command
//! line address them.
//!
//! ## Parameters
//!
//! | Key | Range | Default |
//! |-----|-------|---------|
//! | `osc1_wave` .. `osc4_wave` | 0..=3 (triangle, sawtooth, square, pulse) | saw, saw, saw, triangle |
//! | `osc1_volume` .. `osc4_volume` | 0..1 | 0.8, 0, 0, 0 |
//! | `osc1_range` .. `osc4_range` | -2..=2 octaves | 0, 0, -1, 0 |
//! | `osc2_detune` .. `osc4_detune` | 0..1 (0.5 = center, ±50 cents) | 0.5 |
//! | `noise` | 0..1 | 0 |
//! | `cutoff`, `resonance`, `contour`, `key_follow` | 0..1 | 0.7, 0.2, 0.3, 0 |
//! | `attack`, `decay`, `sustain`, `release` | 0..1 | 0.01, 0.3, 0.7, 0.2 |
//! | `f_attack`, `f_decay`, `f_sustain`, `f_release` | 0..1 | 0.01, 0.3, 0.3, 0.2 |
//! | `glide`, `volume` | 0..1 | 0, 0.7 |
//! | `lfo_rate`, `lfo_pitch`, `lfo_filter` | 0..1 | 0.3, 0, 0 |
//! | `mod_filter`, `mod_pitch` | 0..1 | 0.5, 0.5 |
//! | `bend_range` | 0..1 (x12 semitones) | 0.167 |
//! | `vel_sens` | 0..1 | 0.5 |
//! | `octave_transpose` | -3..=3 octaves | 0 |

use crate::envelope::AdsrParams;
use crate::oscillator::{OSCILLATOR_COUNT, OscillatorSlot, Waveform};
use ladder_core::{ParamDescriptor, ParamId, ParamUnit};

/// Number of engine parameters.
pub const PARAM_COUNT: usize = 38;

/// Every engine setting, in table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    /// Oscillator slots. Slot 0 ignores `detune`.
    pub oscillators: [OscillatorSlot; OSCILLATOR_COUNT],
    /// Noise mix level
    pub noise_volume: f32,
    /// Base cutoff, normalized
    pub cutoff: f32,
    /// Filter feedback
    pub resonance: f32,
    /// Filter envelope amount added to cutoff
    pub contour: f32,
    /// Key tracking amount
    pub key_follow: f32,
    /// Amplitude envelope
    pub amp_env: AdsrParams,
    /// Filter envelope
    pub filter_env: AdsrParams,
    /// Portamento amount
    pub glide: f32,
    /// Master output level
    pub master_volume: f32,
    /// LFO rate, normalized
    pub lfo_rate: f32,
    /// LFO depth to pitch
    pub lfo_pitch_depth: f32,
    /// LFO depth to cutoff
    pub lfo_filter_depth: f32,
    /// Scales LFO cutoff modulation
    pub mod_to_filter: f32,
    /// Scales LFO pitch modulation (together with the mod wheel)
    pub mod_to_pitch: f32,
    /// Pitch bend span as a fraction of an octave
    pub bend_range: f32,
    /// How much velocity affects level
    pub velocity_sensitivity: f32,
    /// Keyboard transpose in octaves, `-3..=3`
    pub octave_transpose: i8,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            oscillators: [
                OscillatorSlot::new(Waveform::Sawtooth, 0.8, 0),
                OscillatorSlot::new(Waveform::Sawtooth, 0.0, 0),
                OscillatorSlot::new(Waveform::Sawtooth, 0.0, -1),
                OscillatorSlot::new(Waveform::Triangle, 0.0, 0),
            ],
            noise_volume: 0.0,
            cutoff: 0.7,
            resonance: 0.2,
            contour: 0.3,
            key_follow: 0.0,
            amp_env: AdsrParams::new(0.01, 0.3, 0.7, 0.2),
            filter_env: AdsrParams::new(0.01, 0.3, 0.3, 0.2),
            glide: 0.0,
            master_volume: 0.7,
            lfo_rate: 0.3,
            lfo_pitch_depth: 0.0,
            lfo_filter_depth: 0.0,
            mod_to_filter: 0.5,
            mod_to_pitch: 0.5,
            bend_range: 0.167,
            velocity_sensitivity: 0.5,
            octave_transpose: 0,
        }
    }
}

/// Field of an oscillator slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OscField {
    Wave,
    Volume,
    Range,
    Detune,
}

/// Engine parameter identifiers, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Param {
    Osc1Wave,
    Osc1Volume,
    Osc1Range,
    Osc2Wave,
    Osc2Volume,
    Osc2Range,
    Osc2Detune,
    Osc3Wave,
    Osc3Volume,
    Osc3Range,
    Osc3Detune,
    Osc4Wave,
    Osc4Volume,
    Osc4Range,
    Osc4Detune,
    Noise,
    Cutoff,
    Resonance,
    Contour,
    KeyFollow,
    AmpAttack,
    AmpDecay,
    AmpSustain,
    AmpRelease,
    FilterAttack,
    FilterDecay,
    FilterSustain,
    FilterRelease,
    Glide,
    Volume,
    LfoRate,
    LfoPitch,
    LfoFilter,
    ModFilter,
    ModPitch,
    BendRange,
    VelocitySensitivity,
    OctaveTranspose,
}

impl Param {
    /// All parameters in table order.
    pub const ALL: [Param; PARAM_COUNT] = [
        Param::Osc1Wave,
        Param::Osc1Volume,
        Param::Osc1Range,
        Param::Osc2Wave,
        Param::Osc2Volume,
        Param::Osc2Range,
        Param::Osc2Detune,
        Param::Osc3Wave,
        Param::Osc3Volume,
        Param::Osc3Range,
        Param::Osc3Detune,
        Param::Osc4Wave,
        Param::Osc4Volume,
        Param::Osc4Range,
        Param::Osc4Detune,
        Param::Noise,
        Param::Cutoff,
        Param::Resonance,
        Param::Contour,
        Param::KeyFollow,
        Param::AmpAttack,
        Param::AmpDecay,
        Param::AmpSustain,
        Param::AmpRelease,
        Param::FilterAttack,
        Param::FilterDecay,
        Param::FilterSustain,
        Param::FilterRelease,
        Param::Glide,
        Param::Volume,
        Param::LfoRate,
        Param::LfoPitch,
        Param::LfoFilter,
        Param::ModFilter,
        Param::ModPitch,
        Param::BendRange,
        Param::VelocitySensitivity,
        Param::OctaveTranspose,
    ];

    /// Parameter at a table index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parameter with the given key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.descriptor().key == key)
    }

    /// Table index
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable key used in patch files
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    /// Metadata for this parameter.
    pub fn descriptor(self) -> ParamDescriptor {
        let n = ParamDescriptor::normalized;
        let wave = |name, short, key, default| {
            ParamDescriptor::stepped(name, short, key, ParamUnit::Choice, 0.0, 3.0, default)
        };
        let range = |name, short, key, default| {
            ParamDescriptor::stepped(name, short, key, ParamUnit::Octaves, -2.0, 2.0, default)
        };

        let desc = match self {
            Param::Osc1Wave => wave("Osc 1 Waveform", "O1 Wave", "osc1_wave", 1.0),
            Param::Osc1Volume => n("Osc 1 Volume", "O1 Vol", "osc1_volume", 0.8),
            Param::Osc1Range => range("Osc 1 Range", "O1 Rng", "osc1_range", 0.0),
            Param::Osc2Wave => wave("Osc 2 Waveform", "O2 Wave", "osc2_wave", 1.0),
            Param::Osc2Volume => n("Osc 2 Volume", "O2 Vol", "osc2_volume", 0.0),
            Param::Osc2Range => range("Osc 2 Range", "O2 Rng", "osc2_range", 0.0),
            Param::Osc2Detune => n("Osc 2 Detune", "O2 Det", "osc2_detune", 0.5),
            Param::Osc3Wave => wave("Osc 3 Waveform", "O3 Wave", "osc3_wave", 1.0),
            Param::Osc3Volume => n("Osc 3 Volume", "O3 Vol", "osc3_volume", 0.0),
            Param::Osc3Range => range("Osc 3 Range", "O3 Rng", "osc3_range", -1.0),
            Param::Osc3Detune => n("Osc 3 Detune", "O3 Det", "osc3_detune", 0.5),
            Param::Osc4Wave => wave("Osc 4 Waveform", "O4 Wave", "osc4_wave", 0.0),
            Param::Osc4Volume => n("Osc 4 Volume", "O4 Vol", "osc4_volume", 0.0),
            Param::Osc4Range => range("Osc 4 Range", "O4 Rng", "osc4_range", 0.0),
            Param::Osc4Detune => n("Osc 4 Detune", "O4 Det", "osc4_detune", 0.5),
            Param::Noise => n("Noise Volume", "Noise", "noise", 0.0),
            Param::Cutoff => n("Filter Cutoff", "Cutoff", "cutoff", 0.7),
            Param::Resonance => n("Filter Resonance", "Reso", "resonance", 0.2),
            Param::Contour => n("Filter Contour", "Contour", "contour", 0.3),
            Param::KeyFollow => n("Key Follow", "KeyFol", "key_follow", 0.0),
            Param::AmpAttack => n("Attack", "Attack", "attack", 0.01),
            Param::AmpDecay => n("Decay", "Decay", "decay", 0.3),
            Param::AmpSustain => n("Sustain", "Sustain", "sustain", 0.7),
            Param::AmpRelease => n("Release", "Release", "release", 0.2),
            Param::FilterAttack => n("Filter Attack", "F Atk", "f_attack", 0.01),
            Param::FilterDecay => n("Filter Decay", "F Dec", "f_decay", 0.3),
            Param::FilterSustain => n("Filter Sustain", "F Sus", "f_sustain", 0.3),
            Param::FilterRelease => n("Filter Release", "F Rel", "f_release", 0.2),
            Param::Glide => n("Glide", "Glide", "glide", 0.0),
            Param::Volume => n("Master Volume", "Volume", "volume", 0.7),
            Param::LfoRate => n("LFO Rate", "LFO Rate", "lfo_rate", 0.3),
            Param::LfoPitch => n("LFO Pitch Depth", "LFO Ptch", "lfo_pitch", 0.0),
            Param::LfoFilter => n("LFO Filter Depth", "LFO Filt", "lfo_filter", 0.0),
            Param::ModFilter => n("Mod to Filter", "Mod Filt", "mod_filter", 0.5),
            Param::ModPitch => n("Mod to Pitch", "Mod Ptch", "mod_pitch", 0.5),
            Param::BendRange => n("Bend Range", "Bend", "bend_range", 0.167),
            Param::VelocitySensitivity => n("Velocity Sensitivity", "Vel Sens", "vel_sens", 0.5),
            Param::OctaveTranspose => ParamDescriptor::stepped(
                "Octave Transpose",
                "Octave",
                "octave_transpose",
                ParamUnit::Octaves,
                -3.0,
                3.0,
                0.0,
            ),
        };
        desc.with_id(ParamId(self as u32))
    }

    fn osc_field(self) -> Option<(usize, OscField)> {
        let field = match self {
            Param::Osc1Wave => (0, OscField::Wave),
            Param::Osc1Volume => (0, OscField::Volume),
            Param::Osc1Range => (0, OscField::Range),
            Param::Osc2Wave => (1, OscField::Wave),
            Param::Osc2Volume => (1, OscField::Volume),
            Param::Osc2Range => (1, OscField::Range),
            Param::Osc2Detune => (1, OscField::Detune),
            Param::Osc3Wave => (2, OscField::Wave),
            Param::Osc3Volume => (2, OscField::Volume),
            Param::Osc3Range => (2, OscField::Range),
            Param::Osc3Detune => (2, OscField::Detune),
            Param::Osc4Wave => (3, OscField::Wave),
            Param::Osc4Volume => (3, OscField::Volume),
            Param::Osc4Range => (3, OscField::Range),
            Param::Osc4Detune => (3, OscField::Detune),
            _ => return None,
        };
        Some(field)
    }
}

impl EngineParams {
    /// Read a parameter as a float.
    pub fn get(&self, param: Param) -> f32 {
        if let Some((slot, field)) = param.osc_field() {
            let osc = &self.oscillators[slot];
            return match field {
                OscField::Wave => f32::from(osc.waveform.index()),
                OscField::Volume => osc.volume,
                OscField::Range => f32::from(osc.range),
                OscField::Detune => osc.detune,
            };
        }

        match param {
            Param::Noise => self.noise_volume,
            Param::Cutoff => self.cutoff,
            Param::Resonance => self.resonance,
            Param::Contour => self.contour,
            Param::KeyFollow => self.key_follow,
            Param::AmpAttack => self.amp_env.attack,
            Param::AmpDecay => self.amp_env.decay,
            Param::AmpSustain => self.amp_env.sustain,
            Param::AmpRelease => self.amp_env.release,
            Param::FilterAttack => self.filter_env.attack,
            Param::FilterDecay => self.filter_env.decay,
            Param::FilterSustain => self.filter_env.sustain,
            Param::FilterRelease => self.filter_env.release,
            Param::Glide => self.glide,
            Param::Volume => self.master_volume,
            Param::LfoRate => self.lfo_rate,
            Param::LfoPitch => self.lfo_pitch_depth,
            Param::LfoFilter => self.lfo_filter_depth,
            Param::ModFilter => self.mod_to_filter,
            Param::ModPitch => self.mod_to_pitch,
            Param::BendRange => self.bend_range,
            Param::VelocitySensitivity => self.velocity_sensitivity,
            Param::OctaveTranspose => f32::from(self.octave_transpose),
            _ => 0.0,
        }
    }

    /// Write a parameter, clamping to its range and rounding stepped values.
    pub fn set(&mut self, param: Param, value: f32) {
        let value = param.descriptor().quantize(value);

        if let Some((slot, field)) = param.osc_field() {
            let osc = &mut self.oscillators[slot];
            match field {
                OscField::Wave => osc.waveform = Waveform::from_index(value as i32),
                OscField::Volume => osc.volume = value,
                OscField::Range => osc.range = value as i8,
                OscField::Detune => osc.detune = value,
            }
            return;
        }

        match param {
            Param::Noise => self.noise_volume = value,
            Param::Cutoff => self.cutoff = value,
            Param::Resonance => self.resonance = value,
            Param::Contour => self.contour = value,
            Param::KeyFollow => self.key_follow = value,
            Param::AmpAttack => self.amp_env.attack = value,
            Param::AmpDecay => self.amp_env.decay = value,
            Param::AmpSustain => self.amp_env.sustain = value,
            Param::AmpRelease => self.amp_env.release = value,
            Param::FilterAttack => self.filter_env.attack = value,
            Param::FilterDecay => self.filter_env.decay = value,
            Param::FilterSustain => self.filter_env.sustain = value,
            Param::FilterRelease => self.filter_env.release = value,
            Param::Glide => self.glide = value,
            Param::Volume => self.master_volume = value,
            Param::LfoRate => self.lfo_rate = value,
            Param::LfoPitch => self.lfo_pitch_depth = value,
            Param::LfoFilter => self.lfo_filter_depth = value,
            Param::ModFilter => self.mod_to_filter = value,
            Param::ModPitch => self.mod_to_pitch = value,
            Param::BendRange => self.bend_range = value,
            Param::VelocitySensitivity => self.velocity_sensitivity = value,
            Param::OctaveTranspose => self.octave_transpose = value as i8,
            _ => {}
        }
    }
}
