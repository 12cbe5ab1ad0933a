use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use strand_sim::errors::SimulationError;
use strand_sim::simulation::{SimulationBuilder, VirusLibrary};
use strand_sim::trace::{emit, render};

use crate::args::RunArgs;
use crate::defaults;
use crate::printing::{print_run_summary, print_validation_errors};
use crate::utils::{Input, read_input, write_atomic};

pub fn run_simulation(args: &RunArgs, quiet: bool) -> Result<()> {
    let config = args.sim.resolve()?;
    let library = load_library(args.sim.virus_file.as_deref())?;

    // Inline sequences without a header are raw; files and stdin are FASTA unless --raw.
    let (input, raw) = match args.sequence.as_deref() {
        Some(seq) if seq != defaults::STDIN => (
            Input {
                source: defaults::ARGUMENT_SOURCE.to_string(),
                text: seq.to_string(),
            },
            args.raw || !seq.starts_with('>'),
        ),
        _ => (read_input(args.file.as_deref())?, args.raw),
    };

    let builder = SimulationBuilder::new()
        .config(config.simulation.clone())
        .viruses(library);
    let builder = if raw {
        builder.raw_sequence(input.text)
    } else {
        builder.fasta(input.text)
    };

    let trace = builder
        .build()
        .map_err(SimulationError::from)
        .and_then(|sim| sim.run())
        .map_err(|e| {
            if let SimulationError::MalformedSequence(errors) = &e {
                print_validation_errors(&input.source, errors);
            }
            e
        })
        .with_context(|| format!("Simulation of {} failed", input.source))?;

    if !quiet {
        print_run_summary(&input.source, &trace);
    }

    let options = args.sim.render_options(&config);
    match &args.output {
        Some(path) => {
            let mut document = render(&trace, &options).context("Failed to serialize trace")?;
            document.push('\n');
            write_atomic(path, document.as_bytes())?;
            log::info!("Wrote {} output to {}", options.shape, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            emit(&trace, &options, &mut stdout.lock()).context("Failed to write trace")?;
        }
    }
    Ok(())
}

/// Load the virus library, or an empty one when no file is given.
pub fn load_library(path: Option<&Path>) -> Result<Arc<VirusLibrary>> {
    let library = match path {
        Some(path) => VirusLibrary::load(path)
            .with_context(|| format!("Failed to load virus library {}", path.display()))?,
        None => VirusLibrary::default(),
    };
    if !library.is_empty() {
        log::info!("Loaded {} virus(es)", library.len());
    }
    Ok(Arc::new(library))
}
