//! CLI argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// ddljson CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name = "ddljson",
    version,
    about = "SQL INSERT DUMP TO JSON CONVERTER - turns go;-separated INSERT batches into endpoint/body JSON records",
    long_about = r#"
SQL INSERT DUMP TO JSON CONVERTER
=================================

Reads a SQL dump of INSERT statements separated by `go;` batch terminators
and writes a JSON array of {endpoint, body} records, one per batch. Column
order is preserved in every row object.

Examples:
  ddljson dump.sql records.json
  ddljson dump.sql records.json --print
"#
)]
pub struct Args {
    /// Path to the SQL dump file to parse
    pub input: PathBuf,

    /// Path to the JSON file to write (created or overwritten)
    pub output: PathBuf,

    /// Echo the parsed records to the console after writing
    #[arg(short = 'P', long)]
    pub print: bool,
}
