//! NetCompare CLI - pin-level comparison of two KiCad netlists.

use clap::{Parser, ValueEnum};
use netcompare::{
    write_report, CompareOptions, ComparisonReport, DiffMode, NetCompareCore, ReportFormat,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "netcompare")]
#[command(about = "Compare pin connectivity of two KiCad netlists", long_about = None)]
#[command(version)]
struct Cli {
    /// First (reference) netlist
    #[arg(value_name = "FILE1")]
    file1: PathBuf,

    /// Second netlist, checked against the first
    #[arg(value_name = "FILE2")]
    file2: PathBuf,

    /// Report output path
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Report format (defaults to json for .json outputs, html otherwise)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also report pins that exist only in FILE2
    #[arg(long)]
    symmetric: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Do not print the summary line
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// HTML report
    Html,
    /// JSON for scripting and CI
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Html => ReportFormat::Html,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    process::exit(handle_compare(cli));
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "netcompare=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_compare(cli: Cli) -> i32 {
    let options = CompareOptions {
        mode: if cli.symmetric {
            DiffMode::Symmetric
        } else {
            DiffMode::Legacy
        },
    };
    let format = cli
        .format
        .map(ReportFormat::from)
        .unwrap_or_else(|| ReportFormat::from_path(&cli.output));

    let report = match NetCompareCore::compare_files(&cli.file1, &cli.file2, options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if let Err(e) = write_report(&report, &cli.output, format) {
        eprintln!("Error: {}", e);
        return 1;
    }

    if !cli.quiet {
        print_summary(&report, &cli.output, cli.symmetric);
    }
    0
}

fn print_summary(report: &ComparisonReport, output: &Path, symmetric: bool) {
    print!(
        "{} vs {}: {} matched, {} mismatched",
        report.file1_name, report.file2_name, report.total_matched, report.total_mismatched
    );
    if symmetric {
        print!(", {} only in {}", report.total_only_in_b, report.file2_name);
    }
    println!();
    println!("Report written to {}", output.display());
}
