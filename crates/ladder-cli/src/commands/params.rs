//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use ladder_synth::{Engine, ParamDescriptor, ParameterInfo};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show only the parameter with this key
    #[arg(value_name = "KEY")]
    key: Option<String>,
}

fn format_range(desc: &ParamDescriptor) -> String {
    if desc.is_stepped() {
        format!("{}..={}", desc.min, desc.max)
    } else {
        format!("{:.1}-{:.1}", desc.min, desc.max)
    }
}

fn print_row(desc: &ParamDescriptor, index: usize) {
    println!(
        "  {:>3}  {:18}  {:24}  {:>8}  {:10}  {}",
        index,
        desc.key,
        desc.name,
        desc.default,
        format_range(desc),
        desc.unit.suffix()
    );
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let engine = Engine::default();

    if let Some(key) = &args.key {
        let index = engine
            .find_param_by_key(key)
            .or_else(|| engine.find_param_by_name(key))
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {key}"))?;
        let desc = engine
            .param_info(index)
            .ok_or_else(|| anyhow::anyhow!("No descriptor for parameter {index}"))?;

        println!("{}", desc.name);
        println!("{}", "=".repeat(desc.name.len()));
        println!();
        println!("  Key:      {}", desc.key);
        println!("  Index:    {index}");
        println!("  Id:       {}", desc.id.0);
        println!("  Default:  {}", desc.default);
        println!("  Range:    {}", format_range(&desc));
        println!("  Stepped:  {}", if desc.is_stepped() { "yes" } else { "no" });
        return Ok(());
    }

    println!("Synth Parameters");
    println!("================");
    println!();
    println!(
        "  {:>3}  {:18}  {:24}  {:>8}  {:10}  {}",
        "#", "Key", "Name", "Default", "Range", "Unit"
    );
    println!(
        "  {:>3}  {:18}  {:24}  {:>8}  {:10}  {}",
        "-", "---", "----", "-------", "-----", "----"
    );

    for index in 0..engine.param_count() {
        if let Some(desc) = engine.param_info(index) {
            print_row(&desc, index);
        }
    }

    println!();
    println!("Set with 'ladder render ... --param key=value'.");
    Ok(())
}
