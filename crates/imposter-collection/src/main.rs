//! Imposter Collection CLI
//!
//! Converts a directory of Mountebank imposter templates into a Postman
//! collection with one folder per imposter and one request per stub.
//!
//! Usage:
//!   imposter-collection [OPTIONS]

use clap::Parser;
use imposter_collection::{run, GenerateOptions, GenerateReport};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Mountebank to Postman collection generator
#[derive(Parser, Debug)]
#[command(name = "imposter-collection")]
#[command(
    author,
    version,
    about = "Generate a Postman collection from Mountebank imposter templates"
)]
struct Args {
    /// Directory containing the imposter templates
    #[arg(short, long, default_value = "mountebank-templates")]
    templates_dir: PathBuf,

    /// Output collection file
    #[arg(short, long, default_value = "mountebank_collection.json")]
    output: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .without_time()
        .init();

    let options = GenerateOptions {
        templates_dir: args.templates_dir,
        output: args.output,
        ..Default::default()
    };

    let report = run(&options)?;

    print_summary(&report);
    println!(
        "{GREEN}{BOLD}Successfully generated {}{RESET}",
        options.output.display()
    );
    Ok(())
}

fn print_summary(report: &GenerateReport) {
    println!();
    println!("{DIM}━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━{RESET}");
    println!("{BOLD}{CYAN}Summary{RESET}");
    println!("{DIM}━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━{RESET}");
    println!(
        "  {DIM}Templates:{RESET} {BOLD}{}{RESET}",
        report.files_seen()
    );

    if report.has_skips() {
        println!(
            "  {YELLOW}Skipped:{RESET}   {BOLD}{YELLOW}{}{RESET}",
            report.skipped.len()
        );
        for skipped in &report.skipped {
            let file_name = skipped
                .file
                .file_name()
                .unwrap_or_default()
                .to_string_lossy();
            println!("    {YELLOW}|{RESET} {CYAN}{file_name}{RESET}: {}", skipped.reason);
        }
    } else {
        println!("  {DIM}Skipped:{RESET}   {BOLD}0{RESET}");
    }

    println!("  {DIM}Folders:{RESET}   {BOLD}{}{RESET}", report.folders);
    println!("  {DIM}Requests:{RESET}  {BOLD}{}{RESET}", report.requests);
    println!();
}
