use anyhow::{Context, Result};
use strand_sim::simulation::Configuration;

use crate::args::InitArgs;
use crate::printing::print_parameters;
use crate::utils::write_atomic;

pub fn init_config(args: &InitArgs) -> Result<()> {
    let output = &args.output;
    if output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    let config = Configuration::default();
    let toml = config
        .to_toml_string()
        .context("Failed to serialize default configuration")?;
    write_atomic(output, toml.as_bytes())?;

    println!("🧬 Strand configuration written to {}", output.display());
    print_parameters(&config);
    println!("💡 Use 'strand run --config {}' to apply it", output.display());
    Ok(())
}
