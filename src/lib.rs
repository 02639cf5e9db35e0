//! ddljson - SQL INSERT DUMP TO JSON CONVERTER
//!
//! Converts a SQL dump of `INSERT` statements (separated by `go;` batch
//! terminators) into a JSON array of `{endpoint, body}` records, where
//! `body` is a list of column-to-value row objects in column declaration
//! order.
//!
//! # Features
//!
//! - **Staged parsing chain**: header, column block, and value rows are
//!   narrowed down with compiled regex patterns and explicit cursors
//! - **Stable output**: row objects keep column declaration order, 2-space
//!   indented JSON
//! - **Fail-fast diagnostics**: the first unparsable fragment aborts the
//!   run with a tagged section report
//! - **Progress display**: per-batch progress bar and a colored run summary
//!
//! # Example
//!
//! ```bash
//! ddljson dump.sql records.json
//! ddljson dump.sql records.json --print
//! ```

pub mod cli;
pub mod error;
pub mod parser;
pub mod record;
pub mod stats;

// Re-exports for convenient access
pub use cli::Args;
pub use error::{DdlJsonError, ParseStage, Result};
pub use parser::{
    parse_columns, parse_ddl, parse_ddl_with_progress, parse_entity_block, parse_header,
    parse_insert, read_parse_file,
};
pub use record::{Record, RowMapping};
pub use stats::{format_bytes, Statistics};
