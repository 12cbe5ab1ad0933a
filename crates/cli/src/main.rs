mod args;
mod commands;
pub mod defaults;
mod printing;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use args::{BatchArgs, InitArgs, RunArgs, ValidateArgs};
use commands::{batch, init, run, validate};

/// Strand: an interpreter for DNA genetic programs
///
/// Reads FASTA text as a small genetic program, simulates it tick by tick and
/// prints the derived proteins, environment and viruses as JSON.
#[derive(Parser, Debug)]
#[command(name = "strand")]
#[command(author, version, about = "Simulates DNA sequences as genetic programs", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that a FASTA file has a header and only A, C, G, T.
    ///
    /// Every problem is reported, not just the first.
    Validate(ValidateArgs),

    /// Simulate one sequence and print the result as JSON.
    ///
    /// The sequence comes from the argument, --file, or stdin.
    Run(Box<RunArgs>),

    /// Simulate many FASTA files concurrently.
    ///
    /// Prints a JSON array with one result or error per file.
    Batch(Box<BatchArgs>),

    /// Write a configuration file with every default spelled out.
    Init(InitArgs),
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, _) => LevelFilter::Debug,
    };
    // RUST_LOG, when set, overrides the flags.
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Validate(args) => {
            validate::validate_input(&args)?;
        }
        Commands::Run(args) => {
            run::run_simulation(&args, cli.quiet)?;
        }
        Commands::Batch(args) => {
            batch::run_batch(&args, cli.quiet)?;
        }
        Commands::Init(args) => {
            init::init_config(&args)?;
        }
    }

    Ok(())
}
