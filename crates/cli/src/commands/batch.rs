use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value;
use strand_sim::errors::SimulationError;
use strand_sim::simulation::{SimulationBuilder, SimulationRequest, SimulationRunner};
use strand_sim::trace::{RenderOptions, Trace, render};

use crate::args::BatchArgs;
use crate::commands::run::load_library;

/// One element of the output array.
#[derive(Serialize)]
struct BatchEntry {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl BatchEntry {
    fn failed(source: String, error: String) -> Self {
        Self {
            source,
            result: None,
            error: Some(error),
        }
    }

    fn new(source: String, result: Result<Trace, SimulationError>, options: &RenderOptions) -> Self {
        let rendered = result.map_err(|e| e.to_string()).and_then(|trace| {
            render(&trace, options)
                .and_then(|doc| Ok(serde_json::from_str::<Value>(&doc)?))
                .map_err(|e| e.to_string())
        });
        match rendered {
            Ok(value) => Self {
                source,
                result: Some(value),
                error: None,
            },
            Err(error) => Self::failed(source, error),
        }
    }
}

pub fn run_batch(args: &BatchArgs, quiet: bool) -> Result<()> {
    let mut config = args.sim.resolve()?;
    if let Some(jobs) = args.jobs {
        config.runner.max_concurrent = jobs;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.runner.timeout_ms = timeout_ms;
    }
    config.validate().context("Invalid configuration")?;

    let library = load_library(args.sim.virus_file.as_deref())?;
    // Unreadable files get an error entry; the rest still run.
    let mut sources = Vec::with_capacity(args.files.len());
    let mut requests = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let source = file.display().to_string();
        match std::fs::read_to_string(file) {
            Ok(text) => {
                let builder = SimulationBuilder::new()
                    .config(config.simulation.clone())
                    .viruses(library.clone())
                    .fasta(text);
                requests.push(SimulationRequest::new(source.clone(), builder));
                sources.push((source, None));
            }
            Err(e) => {
                log::warn!("Skipping {source}: {e}");
                sources.push((source, Some(format!("Failed to read file: {e}"))));
            }
        }
    }

    log::info!(
        "Running {} simulation(s), {} at a time",
        requests.len(),
        config.runner.max_concurrent
    );

    let pb = if args.no_progress || quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(requests.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        pb
    };

    let runner = SimulationRunner::new(&config.runner)?;
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    let progress = pb.clone();
    let results = rt.block_on(runner.run_each(requests, move |id, result| {
        if let Err(e) = result {
            progress.println(format!("✗ {id}: {e}"));
        }
        progress.set_message(id.to_string());
        progress.inc(1);
    }));
    pb.finish_and_clear();

    let options = args.sim.render_options(&config);
    let mut results = results.into_iter();
    let mut entries = Vec::with_capacity(sources.len());
    for (source, read_error) in sources {
        let entry = match (read_error, results.next()) {
            (Some(error), _) => BatchEntry::failed(source, error),
            (None, Some(result)) => BatchEntry::new(source, result, &options),
            (None, None) => BatchEntry::failed(source, "No result produced".to_string()),
        };
        entries.push(entry);
    }
    let failed = entries.iter().filter(|e| e.error.is_some()).count();

    let json = if options.pretty {
        serde_json::to_string_pretty(&entries)?
    } else {
        serde_json::to_string(&entries)?
    };
    println!("{json}");

    if failed > 0 {
        anyhow::bail!("{failed} of {} simulation(s) failed", entries.len());
    }
    Ok(())
}
