use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use strand_sim::simulation::Configuration;
use strand_sim::trace::{OutputShape, RenderOptions};

use crate::defaults;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// FASTA file to check (`-` or nothing reads stdin)
    pub file: Option<PathBuf>,

    /// Treat the input as a bare sequence without a header line
    #[arg(long)]
    pub raw: bool,
}

/// Options shared by `run` and `batch`.
#[derive(Args, Debug, Clone)]
pub struct SimulationArgs {
    /// Configuration file (TOML, or JSON with a `.json` extension)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Virus library: a FASTA file with one record per virus
    #[arg(long = "virus-file", visible_alias = "vf")]
    pub virus_file: Option<PathBuf>,

    /// Output document: final, ticks or graph
    #[arg(long, default_value = defaults::FORMAT)]
    pub format: OutputShape,

    /// Maximum number of ticks before the run counts as diverged
    #[arg(long)]
    pub max_ticks: Option<u64>,

    /// Random seed for transcription errors
    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-codon transcription error probability (requires --seed)
    #[arg(long)]
    pub mutation_rate: Option<f64>,

    /// Protein that environment and virus nodes attach to in graph output
    #[arg(long, conflicts_with = "no_root")]
    pub root_node_index: Option<usize>,

    /// Emit graph output without root edges
    #[arg(long)]
    pub no_root: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl SimulationArgs {
    /// Load the configuration file (if any) and apply command-line overrides.
    pub fn resolve(&self) -> Result<Configuration> {
        let mut config = match &self.config {
            Some(path) => Configuration::load(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => Configuration::default(),
        };

        if let Some(max_ticks) = self.max_ticks {
            config.simulation.max_ticks = max_ticks;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(rate) = self.mutation_rate {
            config.simulation.mutation_rate = rate;
        }
        if let Some(index) = self.root_node_index {
            config.graph.root_node_index = index;
            config.graph.connect_root = true;
        }
        if self.no_root {
            config.graph.connect_root = false;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    pub fn render_options(&self, config: &Configuration) -> RenderOptions {
        RenderOptions::new(self.format)
            .pretty(self.pretty)
            .graph(config.graph.clone())
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Sequence to run, given inline (`-` reads stdin)
    #[arg(conflicts_with = "file")]
    pub sequence: Option<String>,

    /// Read the sequence from a FASTA file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Treat the input as a bare sequence without a header line. Inline
    /// sequences are raw unless they start with '>'
    #[arg(long)]
    pub raw: bool,

    /// Write the JSON document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub sim: SimulationArgs,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// FASTA files to simulate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Maximum number of simulations running at once
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Wall-clock limit per simulation, in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    #[command(flatten)]
    pub sim: SimulationArgs,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the configuration
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
