//! Patch storage for the ladder synth.
//!
//! A patch is a named set of parameter values keyed by the engine's
//! parameter table. Patches persist as TOML files and exchange with hosts as
//! flat JSON objects.
//!
//! # Features
//!
//! - **Patches**: Load, save, capture from and apply to an [`Engine`](ladder_synth::Engine)
//! - **Validation**: Unknown keys and non-finite values are rejected
//! - **Factory Patches**: Built-in sounds embedded at compile time
//!
//! # Example
//!
//! ```rust,no_run
//! use ladder_config::Patch;
//! use ladder_synth::Engine;
//!
//! let patch = Patch::new("Dark Lead")
//!     .with_description("Closed filter, slow glide")
//!     .with_param("cutoff", 0.3)
//!     .with_param("glide", 0.2);
//! patch.save("dark_lead.toml").unwrap();
//!
//! let mut engine = Engine::new(48000.0);
//! Patch::load("dark_lead.toml").unwrap().apply(&mut engine).unwrap();
//! ```

mod error;
mod patch;

/// Factory patches bundled with the library.
pub mod factory_patches;

pub use error::ConfigError;
pub use factory_patches::{factory_patch_ids, factory_patches, get_factory_patch};
pub use patch::Patch;
