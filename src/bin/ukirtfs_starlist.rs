//! Make a UKIRT Faint Standards starlist
//!
//! Queries VizieR for the UKIRT Faint Standard stars and writes them as a
//! Keck starlist to standard output or a file.
//!
//! Usage:
//!   cargo run --bin ukirtfs_starlist -- [--fs] [-o starlist.txt]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::NaiveDateTime;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use ukirtfs::data::{VizierClient, DEFAULT_VIZIER_URL};
use ukirtfs::generator::{generate, GeneratorOptions, Header, OutputSink};
use ukirtfs::UkirtFaintStandards;

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Create a starlist of UKIRT Faint Standards
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file (defaults to standard output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Collect FS stars only
    #[arg(long, action = ArgAction::SetTrue)]
    fs: bool,

    /// Write a provenance comment header before the targets
    #[arg(long, action = ArgAction::SetTrue)]
    header: bool,

    /// Sort targets by right ascension
    #[arg(long, action = ArgAction::SetTrue)]
    sort_ra: bool,

    /// VizieR ASU-TSV endpoint
    #[arg(long, env = "UKIRTFS_VIZIER_URL", default_value = DEFAULT_VIZIER_URL)]
    vizier_url: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Log debugging information to stderr
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn vizier_client(args: &Args) -> VizierClient {
    VizierClient::new()
        .with_base_url(args.vizier_url.clone())
        .with_timeout(Duration::from_secs(args.timeout))
}

/// Map the command line flags onto generator options
fn generator_options(args: &Args, collected_on: NaiveDateTime) -> GeneratorOptions {
    GeneratorOptions {
        primary_only: args.fs,
        sort_by_ra: args.sort_ra,
        header: args.header.then(|| Header::ukirt_fs(collected_on)),
    }
}

fn run(args: Args) -> Result<()> {
    let provider = UkirtFaintStandards::new(vizier_client(&args));
    let options = generator_options(&args, chrono::Local::now().naive_local());
    let sink = OutputSink::from_path(args.output);

    generate(&provider, &options, &sink)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
