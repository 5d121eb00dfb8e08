//! Parameter introspection for the synth engine.
//!
//! This module provides the [`ParameterInfo`] trait and supporting types that
//! let hosts, patch files and the command line discover and set engine
//! parameters without knowing the engine's field layout.
//!
//! # Design
//!
//! Parameters are accessed by a stable zero-based index. Each one is described
//! by a [`ParamDescriptor`] carrying:
//!
//! - `key` - stable snake_case identifier used by patch files (`"cutoff"`)
//! - [`ParamId`] - stable numeric ID for host automation
//! - [`ParamUnit`] - display hint
//! - [`ParamFlags`] - capability flags (automatable, stepped)
//!
//! Most synth parameters are normalized `[0, 1]` floats. Stepped parameters
//! (waveform selectors, octave ranges) carry integer values in a float and are
//! rounded by [`ParamDescriptor::quantize`].
//!
//! # Example
//!
//! ```rust
//! use ladder_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Drive {
//!     amount: f32,
//! }
//!
//! impl ParameterInfo for Drive {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::normalized("Drive", "Drive", "drive", 0.5)
//!                 .with_id(ParamId(1))),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         if index == 0 { self.amount } else { 0.0 }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let Some(desc) = self.param_info(index) {
//!             self.amount = desc.quantize(value);
//!         }
//!     }
//! }
//!
//! let mut drive = Drive { amount: 0.0 };
//! let index = drive.find_param_by_key("drive").unwrap();
//! drive.set_param(index, 2.0);
//! assert_eq!(drive.get_param(index), 1.0);
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Used by plugin hosts for automation recording. Once assigned, a `ParamId`
/// must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
///
/// # Example
///
/// ```rust
/// use ladder_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete integer steps.
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Normalized control in `[0, 1]`.
    Normalized,
    /// Octave offset (oscillator range, keyboard transpose).
    Octaves,
    /// Index into a fixed list of choices (waveform selector).
    Choice,
    /// No unit.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ladder_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Octaves.suffix(), " oct");
    /// assert_eq!(ParamUnit::Normalized.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Octaves => " oct",
            ParamUnit::Normalized | ParamUnit::Choice | ParamUnit::None => "",
        }
    }
}

/// Trait for processors that expose introspectable parameters.
///
/// # Parameter Indexing
///
/// Parameters are accessed by zero-based index. The index must be stable for
/// the lifetime of the instance. Use [`param_count`](Self::param_count) to
/// determine valid indices.
pub trait ParameterInfo {
    /// Returns the number of parameters exposed.
    ///
    /// Valid parameter indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at the given index.
    ///
    /// Returns `None` if `index >= param_count()`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at the given index.
    ///
    /// Returns `0.0` if `index >= param_count()`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value of the parameter at the given index.
    ///
    /// Implementations clamp to the descriptor range and round stepped
    /// parameters. Out-of-bounds indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by display name (case-insensitive).
    ///
    /// Matches against both [`ParamDescriptor::name`] and
    /// [`ParamDescriptor::short_name`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i)
                && (desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name))
            {
                return Some(i);
            }
        }
        None
    }

    /// Find a parameter index by its stable key (exact match).
    fn find_param_by_key(&self, key: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.key == key))
    }
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Filter Cutoff").
    pub name: &'static str,

    /// Short name for narrow displays, max 8 characters (e.g., "Cutoff").
    pub short_name: &'static str,

    /// Stable snake_case key used in patch files (e.g., `"cutoff"`).
    pub key: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value after engine initialization.
    pub default: f32,

    /// Stable numeric ID for host automation.
    ///
    /// Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Capability flags.
    ///
    /// Default: [`ParamFlags::AUTOMATABLE`].
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Continuous `[0, 1]` control.
    pub const fn normalized(
        name: &'static str,
        short_name: &'static str,
        key: &'static str,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            key,
            unit: ParamUnit::Normalized,
            min: 0.0,
            max: 1.0,
            default,
            id: ParamId(0),
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Integer-stepped control over `[min, max]`.
    pub const fn stepped(
        name: &'static str,
        short_name: &'static str,
        key: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            key,
            unit,
            min,
            max,
            default,
            id: ParamId(0),
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Sets the stable parameter ID.
    pub const fn with_id(mut self, id: ParamId) -> Self {
        self.id = id;
        self
    }

    /// Returns `true` if the parameter takes integer values only.
    #[inline]
    pub const fn is_stepped(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED)
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// NaN maps to the default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ladder_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::normalized("Cutoff", "Cutoff", "cutoff", 0.7);
    /// assert_eq!(desc.clamp(0.3), 0.3);
    /// assert_eq!(desc.clamp(-1.0), 0.0);
    /// assert_eq!(desc.clamp(f32::NAN), 0.7);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Clamps and, for stepped parameters, rounds to the nearest integer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ladder_core::{ParamDescriptor, ParamUnit};
    ///
    /// let range = ParamDescriptor::stepped("Range", "Range", "osc1_range", ParamUnit::Octaves, -2.0, 2.0, 0.0);
    /// assert_eq!(range.quantize(1.4), 1.0);
    /// assert_eq!(range.quantize(-7.0), -2.0);
    /// ```
    #[inline]
    pub fn quantize(&self, value: f32) -> f32 {
        let clamped = self.clamp(value);
        if self.is_stepped() {
            libm::roundf(clamped)
        } else {
            clamped
        }
    }
}
