//! Patch management commands.
//!
//! List the factory bank, print patches, and write new patch files.

use crate::patch_source::resolve_patch;
use clap::{Args, Subcommand};
use ladder_config::{Patch, factory_patch_ids, get_factory_patch};
use ladder_synth::Engine;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PatchArgs {
    #[command(subcommand)]
    command: PatchCommand,
}

#[derive(Subcommand)]
enum PatchCommand {
    /// List factory patches
    List,

    /// Print a patch file or factory patch
    Show {
        /// Patch file path or factory patch name
        source: String,

        /// Print the parameters as a flat JSON object
        #[arg(long)]
        json: bool,

        /// Include every parameter, not only the listed ones
        #[arg(long)]
        full: bool,
    },

    /// Write a patch file with every parameter
    Init {
        /// Output TOML file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Patch name
        #[arg(short, long, default_value = "Init")]
        name: String,

        /// Start from a factory patch instead of the defaults
        #[arg(long)]
        from: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: PatchArgs) -> anyhow::Result<()> {
    match args.command {
        PatchCommand::List => list_patches(),
        PatchCommand::Show { source, json, full } => show_patch(&source, json, full),
        PatchCommand::Init {
            output,
            name,
            from,
            force,
        } => init_patch(&output, &name, from.as_deref(), force),
    }
}

fn list_patches() -> anyhow::Result<()> {
    println!("Factory Patches:");
    println!("================");
    for id in factory_patch_ids() {
        if let Some(patch) = get_factory_patch(id) {
            let desc = patch.description.as_deref().unwrap_or("");
            println!("  {id:14} {:16} - {desc}", patch.name);
        }
    }
    println!();
    println!("Render with: ladder render out.wav --notes 45,52,57 --patch <id>");
    Ok(())
}

fn show_patch(source: &str, json: bool, full: bool) -> anyhow::Result<()> {
    let mut patch = resolve_patch(source)?;
    if full {
        let params = patch.to_params()?;
        let description = patch.description.take();
        patch = Patch::from_params(patch.name.clone(), &params);
        patch.description = description;
    }

    if json {
        println!("{}", patch.to_json()?);
    } else {
        print!("{}", patch.to_toml()?);
    }
    Ok(())
}

fn init_patch(output: &Path, name: &str, from: Option<&str>, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite.",
            output.display()
        );
    }

    let mut engine = Engine::default();
    if let Some(source) = from {
        resolve_patch(source)?.apply(&mut engine)?;
    }

    Patch::capture(name, &engine).save(output)?;
    println!("Wrote patch '{name}' to {}", output.display());
    Ok(())
}
