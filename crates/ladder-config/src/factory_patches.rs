//! Factory patches bundled with the ladder synth.
//!
//! Built-in patches that are always available without external files.
//! Each lists only the parameters that differ from the engine defaults.

use crate::Patch;

/// TOML content for factory patches, keyed by id.
///
/// These are embedded at compile time and always available.
static FACTORY_PATCHES_TOML: &[(&str, &str)] = &[
    ("init", INIT_PATCH),
    ("soloist", SOLOIST_PATCH),
    ("duet", DUET_PATCH),
    ("trio", TRIO_PATCH),
    ("quartet", QUARTET_PATCH),
    ("sonata_flair", SONATA_FLAIR_PATCH),
    ("sonata_flair_sub", SONATA_FLAIR_SUB_PATCH),
    ("angry_sweep", ANGRY_SWEEP_PATCH),
    ("square_pulse", SQUARE_PULSE_PATCH),
    ("whisper", WHISPER_PATCH),
    ("cooked_pasta", COOKED_PASTA_PATCH),
    ("cooked_pasta_2", COOKED_PASTA_2_PATCH),
    ("classic_bass", CLASSIC_BASS_PATCH),
    ("sub_bass", SUB_BASS_PATCH),
];

/// Three stacked saws an octave apart.
const INIT_PATCH: &str = r#"
name = "Init"
description = "Three saws across two octaves, mid filter"

[params]
osc1_volume = 0.7
osc1_range = -1
osc2_volume = 0.5
osc2_range = -1
osc2_detune = 0.48
osc3_volume = 0.4
osc3_range = -2
osc3_detune = 0.52
"#;

/// Single bright saw lead.
const SOLOIST_PATCH: &str = r#"
name = "Soloist"
description = "Single bright saw with full resonance and a touch of glide"

[params]
osc1_volume = 0.7
osc1_range = -1
osc2_wave = 0
osc2_detune = 0.64
osc4_range = -2
osc4_detune = 0.66
cutoff = 0.886
resonance = 1.0
contour = 0.5
attack = 0.027
decay = 0.301
sustain = 0.723
release = 0.282
f_attack = 0.178
f_decay = 0.573
f_sustain = 0.16
f_release = 0.316
glide = 0.051
volume = 0.402
"#;

/// Saw over a triangle.
const DUET_PATCH: &str = r#"
name = "Duet"
description = "Saw lead doubled by a triangle an octave up"

[params]
osc1_volume = 0.7
osc1_range = -1
osc2_wave = 0
osc2_volume = 0.863
osc2_detune = 0.64
osc4_range = -2
osc4_detune = 0.66
cutoff = 0.886
resonance = 1.0
contour = 0.5
attack = 0.027
decay = 0.301
sustain = 0.723
release = 0.282
f_attack = 0.178
f_decay = 0.573
f_sustain = 0.16
f_release = 0.316
glide = 0.051
volume = 0.402
"#;

/// Saw, triangle and square.
const TRIO_PATCH: &str = r#"
name = "Trio"
description = "Saw, triangle and a quiet square spread over three octaves"

[params]
osc1_volume = 0.7
osc2_wave = 0
osc2_volume = 0.863
osc2_range = 1
osc2_detune = 0.64
osc3_wave = 2
osc3_volume = 0.151
osc4_range = -2
osc4_detune = 0.66
cutoff = 0.886
resonance = 0.014
contour = 0.5
attack = 0.027
decay = 0.301
sustain = 0.723
release = 0.282
f_attack = 0.178
f_decay = 0.573
f_sustain = 0.16
f_release = 0.316
glide = 0.051
volume = 0.402
"#;

/// All four oscillators.
const QUARTET_PATCH: &str = r#"
name = "Quartet"
description = "Trio with a pulse on the fourth oscillator"

[params]
osc1_volume = 0.7
osc2_wave = 0
osc2_volume = 0.863
osc2_range = 1
osc2_detune = 0.64
osc3_wave = 2
osc3_volume = 0.151
osc4_wave = 3
osc4_volume = 0.466
osc4_range = 1
osc4_detune = 0.66
cutoff = 0.886
resonance = 0.014
contour = 0.5
attack = 0.027
decay = 0.301
sustain = 0.723
release = 0.282
f_attack = 0.178
f_decay = 0.573
f_sustain = 0.16
f_release = 0.316
glide = 0.051
volume = 0.402
"#;

/// Detuned three-saw pad.
const SONATA_FLAIR_PATCH: &str = r#"
name = "Sonata Flair"
description = "Detuned three-saw stack through a dark filter"

[params]
osc1_volume = 0.904
osc1_range = -1
osc2_volume = 0.644
osc2_range = -1
osc2_detune = 0.32
osc3_volume = 0.795
osc4_range = -2
osc4_detune = 0.34
cutoff = 0.527
resonance = 0.521
contour = 0.5
attack = 0.027
decay = 0.301
sustain = 0.723
release = 0.282
f_attack = 0.195
f_decay = 0.445
f_sustain = 0.16
f_release = 0.316
volume = 0.466
"#;

/// Sonata Flair with a saw sub oscillator.
const SONATA_FLAIR_SUB_PATCH: &str = r#"
name = "Sonata Flair Sub"
description = "Sonata Flair with a saw two octaves down"

[params]
osc1_volume = 0.904
osc1_range = -1
osc2_volume = 0.644
osc2_range = -1
osc2_detune = 0.32
osc3_volume = 0.795
osc4_wave = 1
osc4_volume = 0.767
osc4_range = -2
osc4_detune = 0.34
cutoff = 0.527
resonance = 0.521
contour = 0.5
attack = 0.027
decay = 0.301
sustain = 0.723
release = 0.282
f_attack = 0.195
f_decay = 0.445
f_sustain = 0.16
f_release = 0.316
volume = 0.466
"#;

/// Resonant filter sweep.
const ANGRY_SWEEP_PATCH: &str = r#"
name = "Angry Sweep"
description = "Saw and square into a screaming resonant sweep"

[params]
osc1_volume = 0.7
osc1_range = -1
osc2_wave = 2
osc2_volume = 0.644
osc2_range = -1
osc2_detune = 0.32
osc3_volume = 0.795
osc3_detune = 0.18
osc4_range = -2
osc4_detune = 0.34
cutoff = 0.629
resonance = 1.0
contour = 0.5
attack = 0.027
decay = 0.301
sustain = 0.723
release = 0.282
f_attack = 0.178
f_decay = 0.573
f_sustain = 0.16
f_release = 0.316
glide = 0.051
volume = 0.402
"#;

/// Pulse and square.
const SQUARE_PULSE_PATCH: &str = r#"
name = "Square Pulse"
description = "Pulse and square through a nearly self-oscillating filter"

[params]
osc1_wave = 3
osc1_volume = 0.7
osc1_range = -1
osc2_wave = 2
osc2_volume = 0.644
osc2_range = -1
osc2_detune = 0.64
osc4_range = -2
osc4_detune = 0.66
cutoff = 0.704
resonance = 0.973
contour = 0.5
attack = 0.027
decay = 0.301
sustain = 0.723
release = 0.282
f_attack = 0.178
f_decay = 0.573
f_sustain = 0.16
f_release = 0.316
glide = 0.051
volume = 0.402
"#;

/// Soft resonant three-oscillator sound.
const WHISPER_PATCH: &str = r#"
name = "Whisper"
description = "Soft resonant three-oscillator voice"

[params]
osc1_volume = 0.7
osc1_range = -1
osc2_wave = 2
osc2_volume = 0.644
osc2_range = -1
osc2_detune = 0.32
osc3_volume = 0.795
osc3_detune = 0.18
osc4_range = -2
osc4_detune = 0.34
cutoff = 0.718
resonance = 1.0
contour = 0.5
attack = 0.027
decay = 0.301
sustain = 0.723
release = 0.282
f_attack = 0.178
f_decay = 0.546
f_sustain = 0.16
f_release = 0.316
glide = 0.051
volume = 0.293
"#;

/// Percussive pulses.
const COOKED_PASTA_PATCH: &str = r#"
name = "Cooked Pasta"
description = "Percussive pulse pluck with no sustain"

[params]
osc1_wave = 3
osc1_volume = 0.7
osc1_range = -1
osc2_wave = 3
osc2_volume = 0.644
osc2_range = -1
osc2_detune = 1.0
osc3_wave = 0
osc3_volume = 0.795
osc3_range = 1
osc3_detune = 1.0
osc4_range = -2
osc4_detune = 1.0
cutoff = 0.73
resonance = 0.849
contour = 0.5
attack = 0.027
decay = 0.528
sustain = 0.0
release = 0.374
f_attack = 0.084
f_decay = 0.315
f_sustain = 0.27
f_release = 0.319
glide = 0.035
volume = 0.293
"#;

/// Sustained pulses.
const COOKED_PASTA_2_PATCH: &str = r#"
name = "Cooked Pasta 2"
description = "Cooked Pasta held on a sustain level"

[params]
osc1_wave = 3
osc1_volume = 0.699
osc1_range = -1
osc2_wave = 3
osc2_volume = 0.644
osc2_range = -1
osc2_detune = 1.0
osc3_wave = 0
osc3_volume = 0.795
osc3_range = 1
osc3_detune = 1.0
osc4_range = -2
osc4_detune = 1.0
cutoff = 0.73
resonance = 0.849
contour = 0.5
attack = 0.027
decay = 0.528
sustain = 0.41
release = 0.374
f_attack = 0.084
f_decay = 0.315
f_sustain = 0.27
f_release = 0.319
glide = 0.035
volume = 0.247
"#;

/// Punchy two-saw bass.
const CLASSIC_BASS_PATCH: &str = r#"
name = "Classic Bass"
description = "Two detuned saws, snappy filter envelope"

[params]
osc1_volume = 0.9
osc1_range = -1
osc2_volume = 0.7
osc2_range = -1
osc2_detune = 0.53
osc3_wave = 0
osc3_range = 0
cutoff = 0.35
resonance = 0.5
contour = 0.6
attack = 0.0
decay = 0.2
release = 0.1
f_attack = 0.0
f_decay = 0.15
f_sustain = 0.0
f_release = 0.1
"#;

/// Deep triangle sub.
const SUB_BASS_PATCH: &str = r#"
name = "Sub Bass"
description = "Triangle two octaves down with a quiet saw on top"

[params]
osc1_wave = 0
osc1_volume = 0.9
osc1_range = -2
osc2_volume = 0.25
osc2_range = -1
osc3_wave = 0
osc3_range = 0
cutoff = 0.25
resonance = 0.0
attack = 0.0
decay = 0.4
sustain = 0.9
f_attack = 0.0
f_decay = 0.2
f_sustain = 0.0
volume = 0.8
vel_sens = 0.2
"#;

/// Get all factory patches.
///
/// # Example
///
/// ```rust
/// use ladder_config::factory_patches;
///
/// for patch in factory_patches() {
///     println!("{}: {}", patch.name, patch.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_patches() -> Vec<Patch> {
    FACTORY_PATCHES_TOML
        .iter()
        .filter_map(|(_, toml)| Patch::from_toml(toml).ok())
        .collect()
}

/// Get a factory patch by id or display name, case-insensitively.
///
/// # Example
///
/// ```rust
/// use ladder_config::get_factory_patch;
///
/// let bass = get_factory_patch("classic_bass").unwrap();
/// assert_eq!(bass.name, "Classic Bass");
/// assert!(get_factory_patch("Classic Bass").is_some());
/// ```
pub fn get_factory_patch(name: &str) -> Option<Patch> {
    FACTORY_PATCHES_TOML.iter().find_map(|(id, toml)| {
        let patch = Patch::from_toml(toml).ok()?;
        (id.eq_ignore_ascii_case(name) || patch.name.eq_ignore_ascii_case(name)).then_some(patch)
    })
}

/// Ids of all factory patches.
pub fn factory_patch_ids() -> Vec<&'static str> {
    FACTORY_PATCHES_TOML.iter().map(|(id, _)| *id).collect()
}
