//! # regsweep
//!
//! CLI for cleaning a member register spreadsheet and reporting duplicate
//! records.
//!
//! ## Usage
//!
//! ```bash
//! # Clean a workbook into a canonical CSV
//! regsweep export register.xlsx -o cleaned.csv
//!
//! # Pick a sheet and keep empty columns
//! regsweep export register.xlsx --sheet Adresser --keep-empty-columns
//!
//! # Scan the canonical CSV for duplicate emails
//! regsweep dupes cleaned.csv
//!
//! # Scan on a different key column
//! regsweep dupes cleaned.csv --key E-post
//!
//! # Both stages in one go
//! regsweep run register.xlsx
//! ```
//!
//! Each stage prints a one-line status to stdout; with `--json` it prints
//! a machine-readable summary instead. Errors go to stderr with a
//! non-zero exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use regsweeplib::{
    export_clean, scan_file, ExportOptions, NormalizeOptions, ScanOptions, ScanOutcome,
    SheetSelector, DEFAULT_KEY_COLUMN,
};

/// Default output name for the canonical CSV
const DEFAULT_CSV: &str = "cleaned.csv";
/// Default output name for the duplicate report
const DEFAULT_REPORT: &str = "duplicate-rows.txt";

/// Build the clap Command structure
fn build_command() -> Command {
    let input_arg = Arg::new("input").help("Source file to read").required(true);
    let sheet_arg = Arg::new("sheet")
        .short('s')
        .long("sheet")
        .help("Sheet name to read from a workbook (defaults to the first sheet)");
    let keep_rows_arg = Arg::new("keep-empty-rows")
        .long("keep-empty-rows")
        .action(ArgAction::SetTrue)
        .help("Keep rows whose cells are all empty");
    let keep_cols_arg = Arg::new("keep-empty-columns")
        .long("keep-empty-columns")
        .action(ArgAction::SetTrue)
        .help("Keep columns whose cells are all empty");
    let key_arg = Arg::new("key")
        .short('k')
        .long("key")
        .default_value(DEFAULT_KEY_COLUMN)
        .help("Column whose value identifies duplicate records");

    Command::new("regsweep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Clean a member register spreadsheet and report duplicate records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print a JSON summary instead of the status line"),
        )
        .subcommand(
            Command::new("export")
                .about("Normalize a tabular source and write a canonical CSV")
                .arg(input_arg.clone())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .default_value(DEFAULT_CSV)
                        .help("Path of the canonical CSV to write"),
                )
                .arg(sheet_arg.clone())
                .arg(keep_rows_arg.clone())
                .arg(keep_cols_arg.clone()),
        )
        .subcommand(
            Command::new("dupes")
                .about("Scan a canonical CSV for rows sharing a key value")
                .arg(input_arg.clone())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .default_value(DEFAULT_REPORT)
                        .help("Path of the duplicate report to write"),
                )
                .arg(key_arg.clone()),
        )
        .subcommand(
            Command::new("run")
                .about("Run both stages: export a canonical CSV, then scan it")
                .arg(input_arg)
                .arg(
                    Arg::new("csv")
                        .long("csv")
                        .default_value(DEFAULT_CSV)
                        .help("Path of the canonical CSV hand-off file"),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .default_value(DEFAULT_REPORT)
                        .help("Path of the duplicate report to write"),
                )
                .arg(sheet_arg)
                .arg(keep_rows_arg)
                .arg(keep_cols_arg)
                .arg(key_arg),
        )
}

/// Assemble export options from parsed arguments
fn extract_export_options(matches: &ArgMatches) -> ExportOptions {
    let sheet = SheetSelector::from_name(matches.get_one::<String>("sheet").map(|s| s.as_str()));
    let normalize = NormalizeOptions::new()
        .drop_empty_rows(!matches.get_flag("keep-empty-rows"))
        .drop_empty_columns(!matches.get_flag("keep-empty-columns"));
    ExportOptions::new().sheet(sheet).normalize(normalize)
}

/// Handler for the export subcommand
fn export_handler(matches: &ArgMatches, json: bool) -> anyhow::Result<()> {
    let input = PathBuf::from(matches.get_one::<String>("input").unwrap());
    let output = PathBuf::from(matches.get_one::<String>("output").unwrap());
    let options = extract_export_options(matches);

    let summary = export_clean(&input, &output, &options)
        .with_context(|| format!("could not export '{}'", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} {} ({} rows x {} columns)",
            Style::new().green().apply_to("Cleaned data exported to"),
            summary.output.display(),
            summary.rows_out,
            summary.columns_out
        );
    }
    Ok(())
}

/// Handler for the dupes subcommand
fn dupes_handler(matches: &ArgMatches, json: bool) -> anyhow::Result<()> {
    let input = PathBuf::from(matches.get_one::<String>("input").unwrap());
    let output = PathBuf::from(matches.get_one::<String>("output").unwrap());
    let options = ScanOptions::new().key_column(matches.get_one::<String>("key").unwrap());

    let outcome = scan_file(&input, &output, &options)
        .with_context(|| format!("could not scan '{}'", input.display()))?;

    report_outcome(&outcome, &options.key_column, json)
}

/// Handler for the run subcommand: export, then scan the hand-off file
fn run_handler(matches: &ArgMatches, json: bool) -> anyhow::Result<()> {
    let input = PathBuf::from(matches.get_one::<String>("input").unwrap());
    let csv = PathBuf::from(matches.get_one::<String>("csv").unwrap());
    let report = PathBuf::from(matches.get_one::<String>("report").unwrap());
    let options = extract_export_options(matches);
    let scan_options = ScanOptions::new().key_column(matches.get_one::<String>("key").unwrap());

    let summary = export_clean(&input, &csv, &options)
        .with_context(|| format!("could not export '{}'", input.display()))?;

    if !json {
        println!(
            "{} {} ({} rows x {} columns)",
            Style::new().green().apply_to("Cleaned data exported to"),
            summary.output.display(),
            summary.rows_out,
            summary.columns_out
        );
    }

    let outcome = scan_file(&csv, &report, &scan_options)
        .with_context(|| format!("could not scan '{}'", csv.display()))?;

    report_outcome(&outcome, &scan_options.key_column, json)
}

/// Print the scan outcome as a status line or JSON summary
fn report_outcome(outcome: &ScanOutcome, key: &str, json: bool) -> anyhow::Result<()> {
    match outcome {
        ScanOutcome::Clean { rows_scanned } => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "duplicates": false,
                        "rows_scanned": rows_scanned,
                        "key_column": key,
                    })
                );
            } else {
                println!(
                    "{}",
                    Style::new()
                        .green()
                        .apply_to(format!("No duplicate '{}' values found.", key))
                );
            }
        }
        ScanOutcome::Duplicates { report, path } => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "duplicates": true,
                        "duplicate_rows": report.row_count(),
                        "key_column": key,
                        "report": path,
                    })
                );
            } else {
                println!(
                    "{} {} rows with duplicate '{}' values; report written to {}",
                    Style::new().yellow().apply_to("Found"),
                    report.row_count(),
                    key,
                    path.display()
                );
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let matches = build_command().get_matches();
    let json = matches.get_flag("json");

    let result = match matches.subcommand() {
        Some(("export", sub)) => export_handler(sub, json),
        Some(("dupes", sub)) => dupes_handler(sub, json),
        Some(("run", sub)) => run_handler(sub, json),
        _ => unreachable!("subcommand required"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
