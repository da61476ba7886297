//! covkit: coverage stream filters
//!
//! Usage: covkit <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use std::io;
use std::path::PathBuf;
use std::process;

use covkit::bed::BedError;
use covkit::commands::{ChromsCommand, CountCommand, GroupCommand, MergeCommand, SumCommand};
use covkit::genome::Genome;

#[derive(Parser)]
#[command(name = "covkit")]
#[command(version)]
#[command(about = "Coverage stream filters for samtools depth and BEDGRAPH data", long_about = None)]
struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sum coverage of BED3/BEDGRAPH/BED6 intervals into merged intervals
    Sum {
        /// Input file (default: stdin, or use -)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Genome file (chrom<TAB>length) defining chromosome boundaries
        #[arg(short = 'g', long)]
        genome: Option<PathBuf>,
    },

    /// Count samples with nonzero depth per position (samtools depth input)
    Count {
        /// Input file (default: stdin, or use -)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Merge touching records with equal chromosome and value
    Merge {
        /// Input file (default: stdin, or use -)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Group key<TAB>value lines by key
    Group {
        /// Input file (default: stdin, or use -)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List @SQ sequence names from a SAM header
    Chroms {
        /// Input file (default: stdin, or use -)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Sum { input, genome } => run_sum(input, genome),
        Commands::Count { input } => run_count(input),
        Commands::Merge { input } => run_merge(input),
        Commands::Group { input } => run_group(input),
        Commands::Chroms { input } => run_chroms(input),
    };

    match result {
        Ok(()) => {}
        // The downstream reader went away (e.g. `| head`): not a failure.
        Err(e) if e.is_broken_pipe() => process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_sum(input: Option<PathBuf>, genome: Option<PathBuf>) -> Result<(), BedError> {
    let mut cmd = SumCommand::new();
    if let Some(path) = genome {
        let genome = Genome::from_file(&path)?;
        info!("Loaded {} chromosome lengths from {}", genome.len(), path.display());
        cmd = cmd.with_genome(genome);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let stats = cmd.run(input.as_deref(), &mut handle)?;
    info!("Sum stats: {}", stats);
    Ok(())
}

fn run_count(input: Option<PathBuf>) -> Result<(), BedError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let stats = CountCommand::new().run(input.as_deref(), &mut handle)?;
    info!("Count stats: {}", stats);
    Ok(())
}

fn run_merge(input: Option<PathBuf>) -> Result<(), BedError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let stats = MergeCommand::new().run(input.as_deref(), &mut handle)?;
    info!("Merge stats: {}", stats);
    Ok(())
}

fn run_group(input: Option<PathBuf>) -> Result<(), BedError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let stats = GroupCommand::new().run(input.as_deref(), &mut handle)?;
    info!("Group stats: {}", stats);
    Ok(())
}

fn run_chroms(input: Option<PathBuf>) -> Result<(), BedError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let written = ChromsCommand::new().run(input.as_deref(), &mut handle)?;
    info!("Extracted {} sequence names", written);
    Ok(())
}
