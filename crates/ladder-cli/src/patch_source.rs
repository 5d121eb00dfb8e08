//! Patch lookup shared by the render and patch commands.
//!
//! A patch argument is either a path to a TOML file or the id/name of a
//! factory patch. Existing files win over factory names.

use anyhow::Context;
use ladder_config::{ConfigError, Patch, get_factory_patch};
use std::path::Path;

/// Load a patch from a file path or factory name.
pub fn resolve_patch(source: &str) -> anyhow::Result<Patch> {
    let path = Path::new(source);
    if path.is_file() {
        return Patch::load(path).with_context(|| format!("loading patch {}", path.display()));
    }

    get_factory_patch(source)
        .ok_or_else(|| ConfigError::PatchNotFound(source.to_string()))
        .context("not a patch file or factory patch name (see 'ladder patch list')")
}
