//! Patch file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use ladder_synth::{Engine, EngineParams, Param};

use crate::error::ConfigError;

/// Decimal places kept when capturing parameter values.
const CAPTURE_PRECISION: f64 = 1e6;

/// A named set of synth parameter values.
///
/// Patches are stored as TOML files. Only the parameters that differ from
/// the engine defaults need to be listed; anything missing takes its
/// default value when the patch is applied.
///
/// # TOML Format
///
/// ```toml
/// name = "Classic Bass"
/// description = "Two detuned saws into a closed filter"
///
/// [params]
/// osc1_range = -1
/// osc2_volume = 0.7
/// osc2_detune = 0.53
/// cutoff = 0.35
/// resonance = 0.5
/// ```
///
/// The `params` table alone, serialized as a flat JSON object, is the
/// host state format (see [`Patch::to_json`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patch {
    /// Display name.
    pub name: String,

    /// Optional description of the sound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values by key.
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl Patch {
    /// Create an empty patch. Applying it restores the engine defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a patch with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: f64) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Snapshot every parameter of an engine.
    pub fn capture(name: impl Into<String>, engine: &Engine) -> Self {
        Self::from_params(name, &engine.params)
    }

    /// Snapshot every value of a parameter set.
    pub fn from_params(name: impl Into<String>, params: &EngineParams) -> Self {
        let params = Param::ALL
            .iter()
            .map(|&p| {
                let value = (f64::from(params.get(p)) * CAPTURE_PRECISION).round() / CAPTURE_PRECISION;
                (p.key().to_string(), value)
            })
            .collect();
        Self {
            name: name.into(),
            description: None,
            params,
        }
    }

    /// Check that every key is known and every value is finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, &value) in &self.params {
            if Param::from_key(key).is_none() {
                return Err(ConfigError::UnknownParam(key.clone()));
            }
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteParam {
                    key: key.clone(),
                    value: value as f32,
                });
            }
        }
        Ok(())
    }

    /// Build a full parameter set: defaults overlaid with this patch.
    ///
    /// Out-of-range values are clamped and stepped values rounded.
    pub fn to_params(&self) -> Result<EngineParams, ConfigError> {
        self.validate()?;
        let mut params = EngineParams::default();
        for (key, &value) in &self.params {
            if let Some(param) = Param::from_key(key) {
                params.set(param, value as f32);
            }
        }
        Ok(params)
    }

    /// Replace the engine's parameters with this patch.
    ///
    /// The engine is left untouched if the patch is invalid.
    pub fn apply(&self, engine: &mut Engine) -> Result<(), ConfigError> {
        engine.params = self.to_params()?;
        tracing::debug!(patch = %self.name, "patch applied");
        Ok(())
    }

    /// Load a patch from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let patch = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), patch = %patch.name, "patch loaded");
        Ok(patch)
    }

    /// Parse a patch from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let patch: Patch = toml::from_str(toml_str)?;
        patch.validate()?;
        Ok(patch)
    }

    /// Save the patch to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), patch = %self.name, "patch saved");
        Ok(())
    }

    /// Convert the patch to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serialize the parameters as a flat JSON object of key to number.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(&self.params)?)
    }

    /// Build a patch from a flat JSON object of key to number.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, ConfigError> {
        let params: BTreeMap<String, f64> = serde_json::from_str(json)?;
        let patch = Self {
            name: name.into(),
            description: None,
            params,
        };
        patch.validate()?;
        Ok(patch)
    }

    /// Number of parameters listed in the patch.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the patch lists no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get a listed parameter value by key.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.params.get(key).copied()
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self::new("Init")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_synth::{PARAM_COUNT, Waveform};

    #[test]
    fn test_patch_builder() {
        let patch = Patch::new("Test")
            .with_description("A test patch")
            .with_param("cutoff", 0.4)
            .with_param("resonance", 0.8);

        assert_eq!(patch.name, "Test");
        assert_eq!(patch.description, Some("A test patch".to_string()));
        assert_eq!(patch.len(), 2);
        assert_eq!(patch.get("cutoff"), Some(0.4));
        assert_eq!(patch.get("contour"), None);
    }

    #[test]
    fn test_toml_round_trip() {
        let patch = Patch::new("Round Trip")
            .with_param("osc1_wave", 2.0)
            .with_param("cutoff", 0.35);

        let toml_str = patch.to_toml().unwrap();
        assert!(toml_str.contains("[params]"));
        let parsed = Patch::from_toml(&toml_str).unwrap();
        assert_eq!(patch, parsed);
    }

    #[test]
    fn test_integer_values_parse() {
        let toml_str = r#"
name = "Ints"

[params]
osc1_range = -2
osc2_wave = 3
"#;
        let patch = Patch::from_toml(toml_str).unwrap();
        let params = patch.to_params().unwrap();
        assert_eq!(params.oscillators[0].range, -2);
        assert_eq!(params.oscillators[1].waveform, Waveform::Pulse);
    }

    #[test]
    fn test_minimal_toml_defaults() {
        let patch = Patch::from_toml(r#"name = "Bare""#).unwrap();
        assert!(patch.is_empty());
        assert!(patch.description.is_none());
        assert_eq!(patch.to_params().unwrap(), EngineParams::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let toml_str = r#"
name = "Bad"

[params]
wobble = 0.5
"#;
        let err = Patch::from_toml(toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParam(ref k) if k == "wobble"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let patch = Patch::new("Nan").with_param("cutoff", f64::NAN);
        assert!(matches!(
            patch.validate(),
            Err(ConfigError::NonFiniteParam { .. })
        ));
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let patch = Patch::new("Hot")
            .with_param("cutoff", 4.0)
            .with_param("octave_transpose", -9.0)
            .with_param("osc2_range", 0.6);
        let params = patch.to_params().unwrap();
        assert_eq!(params.cutoff, 1.0);
        assert_eq!(params.octave_transpose, -3);
        assert_eq!(params.oscillators[1].range, 1);
    }

    #[test]
    fn test_capture_lists_every_param() {
        let engine = Engine::new(44100.0);
        let patch = Patch::capture("Snapshot", &engine);
        assert_eq!(patch.len(), PARAM_COUNT);
        assert_eq!(patch.get("cutoff"), Some(0.7));
        assert_eq!(patch.get("bend_range"), Some(0.167));
    }

    #[test]
    fn test_capture_apply_restores_engine_params() {
        let mut source = Engine::new(44100.0);
        source.params.set(Param::Cutoff, 0.25);
        source.params.set(Param::Osc3Wave, 2.0);
        source.params.set(Param::OctaveTranspose, 1.0);
        let patch = Patch::capture("Copy", &source);

        let mut target = Engine::new(44100.0);
        target.params.set(Param::Resonance, 0.9);
        patch.apply(&mut target).unwrap();
        assert_eq!(target.params, source.params);
    }

    #[test]
    fn test_invalid_patch_leaves_engine_untouched() {
        let mut engine = Engine::new(44100.0);
        engine.params.cutoff = 0.1;
        let patch = Patch::new("Bad").with_param("nope", 1.0);
        assert!(patch.apply(&mut engine).is_err());
        assert_eq!(engine.params.cutoff, 0.1);
    }

    #[test]
    fn test_json_flat_object() {
        let patch = Patch::new("Json")
            .with_param("octave_transpose", 1.0)
            .with_param("cutoff", 0.5);
        let json = patch.to_json().unwrap();
        assert_eq!(json, r#"{"cutoff":0.5,"octave_transpose":1.0}"#);

        let parsed = Patch::from_json("Json", &json).unwrap();
        assert_eq!(parsed, patch);
    }

    #[test]
    fn test_json_accepts_integers_and_rejects_unknown() {
        let patch = Patch::from_json("State", r#"{"osc1_wave": 3, "volume": 0.5}"#).unwrap();
        assert_eq!(patch.get("osc1_wave"), Some(3.0));
        assert!(matches!(
            Patch::from_json("State", r#"{"bogus": 1}"#),
            Err(ConfigError::UnknownParam(_))
        ));
        assert!(matches!(
            Patch::from_json("State", "not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
