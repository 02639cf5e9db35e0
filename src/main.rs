//! ddljson - SQL INSERT DUMP TO JSON CONVERTER
//!
//! Main entry point: thin glue around the parsing chain.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;

use ddljson::{
    cli::Args,
    error::DdlJsonError,
    parser::parse_ddl_with_progress,
    record::Record,
    stats::Statistics,
};

fn main() -> Result<()> {
    let args = Args::parse();

    validate_input(&args)?;

    print_header(&args);

    let contents = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read input file {:?}", args.input))?;

    let mut stats = Statistics::new();
    stats.add_bytes_read(contents.len() as u64);

    println!("\n{}", "⚡ Parsing batches...".bright_cyan());
    let pb = create_progress_bar();

    let records = match parse_ddl_with_progress(&contents, Some(&pb)) {
        Ok(records) => {
            pb.finish_with_message("done");
            records
        }
        Err(err) => {
            pb.abandon();
            report_failure(&err);
            return Err(err.into());
        }
    };

    for record in &records {
        stats.record_batch(record.body.len());
    }

    let json = serialize_records(&records)?;
    stats.add_bytes_written(json.len() as u64);

    println!("\n{}", "💾 Writing JSON output...".bright_cyan());
    fs::write(&args.output, &json)
        .with_context(|| format!("cannot write output file {:?}", args.output))?;

    if args.print {
        println!("{}", json);
    }

    stats.print_summary();
    println!("\n{} Saved: {:?}\n", "✅".bright_green(), args.output);

    Ok(())
}

/// Check the input path before doing any work.
fn validate_input(args: &Args) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("input file does not exist: {:?}", args.input);
    }

    if !args.input.is_file() {
        anyhow::bail!("input path is not a file: {:?}", args.input);
    }

    Ok(())
}

/// Print the run banner.
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🚀 SQL INSERT DUMP TO JSON CONVERTER".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} Input file:  {:?}", "📂".bright_cyan(), args.input);
    println!("  {} Output file: {:?}", "📄".bright_green(), args.output);

    if args.print {
        println!(
            "  {} {}",
            "🖨️".bright_magenta(),
            "Echoing parsed records to console".magenta()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// Serialize the full record list with 2-space indentation.
fn serialize_records(records: &[Record]) -> Result<String> {
    let json = serde_json::to_string_pretty(records).map_err(|e| {
        DdlJsonError::SerializeError {
            reason: e.to_string(),
        }
    })?;
    Ok(json)
}

/// Per-batch progress bar; the parser sets the length once it has split the
/// input.
fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );
    pb
}

/// Print the framed section report for a parse failure.
fn report_failure(err: &DdlJsonError) {
    if let DdlJsonError::Parse { stage, fragment } = err {
        let bar = "=".repeat(10);
        eprintln!(
            "{}",
            format!("{}{:<14} error{}", bar, stage.tag(), bar).bright_red()
        );
        eprintln!("{}", fragment);
        eprintln!(
            "{}",
            format!("{}/{:<13} error{}", bar, stage.tag(), bar).bright_red()
        );
    } else {
        eprintln!("{} {}", "❌".bright_red(), err);
    }
}
