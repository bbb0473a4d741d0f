//! A Keck starlist parsing and verification tool
//!
//! Prints every line that breaks the strict starlist layout, followed by its
//! diagnostics. Exits non-zero when any error is found.
//!
//! Usage:
//!   cargo run --bin starlist_lint -- [--json] starlist.txt

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use serde::Serialize;
use ukirtfs::starlist::{verify_starlist_line, Diagnostic, Severity, COMMENT_PREFIX};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Starlist lint
#[derive(Parser, Debug)]
#[command(author, version, about = "A Keck starlist parsing and verification tool", long_about = None)]
struct Args {
    /// Emit findings as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Starlist filename
    #[arg(default_value = "starlist.txt")]
    starlist: PathBuf,
}

#[derive(Debug, Serialize)]
struct LineReport {
    line_number: usize,
    line: String,
    diagnostics: Vec<Diagnostic>,
}

/// Lint every non-comment line; unparseable lines become a single error
fn lint<R: BufRead>(reader: R) -> Result<Vec<LineReport>> {
    let mut reports = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.starts_with(COMMENT_PREFIX) || line.trim().is_empty() {
            continue;
        }
        let diagnostics = match verify_starlist_line(&line) {
            Ok(diagnostics) => diagnostics,
            Err(e) => vec![Diagnostic {
                severity: Severity::Error,
                token: "Line",
                message: e.to_string(),
            }],
        };
        if !diagnostics.is_empty() {
            reports.push(LineReport {
                line_number: index + 1,
                line,
                diagnostics,
            });
        }
    }
    Ok(reports)
}

fn run(args: &Args) -> Result<bool> {
    let file = File::open(&args.starlist)?;
    let reports = lint(BufReader::new(file))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!(
            "Starlist Lint {} for '{}'",
            env!("CARGO_PKG_VERSION"),
            args.starlist.display()
        );
        for report in &reports {
            let identifier = format!("'{}' line {}", args.starlist.display(), report.line_number);
            println!("{}", report.line);
            for diagnostic in &report.diagnostics {
                println!("{}", diagnostic.compose(&identifier));
            }
        }
    }

    Ok(reports
        .iter()
        .flat_map(|r| &r.diagnostics)
        .any(|d| d.severity == Severity::Error))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
