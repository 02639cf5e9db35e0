//! Error types for ddljson.
//!
//! A single fatal `Parse` error covers the whole parsing chain, tagged with
//! the stage that raised it; the remaining variants cover the I/O glue.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which stage of the parsing chain rejected its input.
///
/// The `Display` form is the lowercase section tag used in diagnostics
/// (`header`, `columns`, `entities`, `entity`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    /// The `INSERT INTO [name]` clause was not found.
    Header,
    /// The `(col, ...) VALUES` block was missing or yielded no columns.
    Columns,
    /// A value-row line did not look like a parenthesized tuple.
    Entities,
    /// A single value token produced no capture (e.g. an empty `''`).
    Entity,
}

impl ParseStage {
    /// The section tag printed in error reports.
    pub fn tag(self) -> &'static str {
        match self {
            ParseStage::Header => "header",
            ParseStage::Columns => "columns",
            ParseStage::Entities => "entities",
            ParseStage::Entity => "entity",
        }
    }
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Errors that can abort a ddljson run.
#[derive(Error, Debug)]
pub enum DdlJsonError {
    /// A stage of the parsing chain rejected its input fragment.
    #[error("{stage} section did not parse:\n{fragment}")]
    Parse { stage: ParseStage, fragment: String },

    /// The input dump file could not be read.
    #[error("cannot read input file ({file}): {reason}")]
    ReadError { file: PathBuf, reason: String },

    /// The output file could not be written.
    #[error("cannot write output file ({file}): {reason}")]
    WriteError { file: PathBuf, reason: String },

    /// The parsed records failed to serialize.
    #[error("JSON serialization failed: {reason}")]
    SerializeError { reason: String },
}

impl DdlJsonError {
    /// Build a `Parse` error for `stage`, keeping the offending fragment.
    pub fn parse(stage: ParseStage, fragment: impl Into<String>) -> Self {
        DdlJsonError::Parse {
            stage,
            fragment: fragment.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DdlJsonError>;
