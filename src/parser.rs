//! The parsing chain.
//!
//! A staged text-to-structure pipeline over one SQL dump: split on `go;`
//! batch terminators, then for each batch narrow the text down with
//! positional cursors - header clause, column block, then one value row per
//! line. All patterns are compiled once into module statics.
//!
//! Every stage either returns its structured result or a `Parse` error
//! tagged with the stage name; the first failure aborts the whole run.

use indicatif::ProgressBar;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::error::{DdlJsonError, ParseStage, Result};
use crate::record::Record;

/// `INSERT INTO [Name]` clause, optional brackets around the identifier.
static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)insert into \[?(\w+)\]?\n").unwrap());

/// `(col1, col2, ...)` followed by the `VALUES` keyword.
static COLUMN_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i) *\(([\w ,_]+)\)\n? *values\n?").unwrap());

/// One identifier inside the column block.
static COLUMN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// One parenthesized value tuple, optionally trailed by a comma.
static ENTITY_BLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" *\((.+)\) *,?\n?").unwrap());

/// Candidate split point between two values: a comma followed by whitespace.
static VALUE_DELIMITER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s+").unwrap());

/// Value token with an optional single layer of surrounding quotes.
static VALUE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"'?([^'\n]+)'?").unwrap());

/// Batch terminator between INSERT statements.
static BATCH_TERMINATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)go;").unwrap());

/// Locate the `INSERT INTO` clause in one batch.
///
/// Returns the captured table name and the offset just past the match, so
/// the caller can continue scanning from there.
pub fn parse_header(batch: &str) -> Result<(String, usize)> {
    let caps = HEADER_RE
        .captures(batch)
        .ok_or_else(|| DdlJsonError::parse(ParseStage::Header, batch))?;

    let name = caps[1].to_string();
    let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
    Ok((name, end))
}

/// Extract the ordered column list from the `(...) VALUES` block.
///
/// `rest` is the batch text after the header match; the returned offset is
/// relative to it. Fails if the block is missing or yields no identifiers.
pub fn parse_columns(rest: &str) -> Result<(Vec<String>, usize)> {
    let caps = COLUMN_BLOCK_RE
        .captures(rest)
        .ok_or_else(|| DdlJsonError::parse(ParseStage::Columns, rest))?;

    let columns: Vec<String> = COLUMN_RE
        .find_iter(&caps[1])
        .map(|m| m.as_str().to_string())
        .collect();

    if columns.is_empty() {
        return Err(DdlJsonError::parse(ParseStage::Columns, rest));
    }

    let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
    Ok((columns, end))
}

/// Parse the value-row section of a batch: one tuple per non-empty line.
pub fn parse_entity_block(rest: &str) -> Result<Vec<Vec<String>>> {
    let mut entities = Vec::new();
    for line in rest.split('\n') {
        if !line.is_empty() {
            entities.push(parse_entity(line)?);
        }
    }
    Ok(entities)
}

/// Parse one line as a parenthesized value tuple.
fn parse_entity(line: &str) -> Result<Vec<String>> {
    let caps = ENTITY_BLOCK_RE
        .captures(line)
        .ok_or_else(|| DdlJsonError::parse(ParseStage::Entities, line))?;

    let inner = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    split_entity_values(inner)
        .into_iter()
        .map(|token| unquote_value(token, line))
        .collect()
}

/// Split one tuple's inner text into raw value tokens.
///
/// A `,\s+` match is a real delimiter only when the remainder of the string
/// after it contains an even number of single quotes, i.e. the comma is not
/// inside a quoted span. A comma with no following whitespace is never a
/// delimiter.
fn split_entity_values(inner: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for m in VALUE_DELIMITER_RE.find_iter(inner) {
        let rest = &inner[m.end()..];
        if rest.matches('\'').count() % 2 == 0 {
            tokens.push(&inner[start..m.start()]);
            start = m.end();
        }
    }
    tokens.push(&inner[start..]);
    tokens
}

/// Strip a single layer of surrounding quotes from one raw token.
///
/// The capture runs to the next quote or end of token, so a doubled
/// internal quote (`'O''Brien'`) yields only the text before it (`O`).
/// This is a literal strip, not SQL unescaping.
fn unquote_value(token: &str, line: &str) -> Result<String> {
    VALUE_RE
        .captures(token)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| DdlJsonError::parse(ParseStage::Entity, line))
}

/// Parse one full INSERT batch into a `Record`.
///
/// Runs header, columns, and entity-block parsing in sequence, advancing an
/// explicit cursor by each stage's consumed length, then zips the column
/// list with every row.
pub fn parse_insert(batch: &str) -> Result<Record> {
    let (endpoint, header_end) = parse_header(batch)?;
    let (columns, columns_end) = parse_columns(&batch[header_end..])?;
    let rows = parse_entity_block(&batch[header_end + columns_end..])?;
    Ok(Record::from_rows(endpoint, &columns, rows))
}

/// Parse a whole dump: every `go;`-terminated batch, in order.
pub fn parse_ddl(contents: &str) -> Result<Vec<Record>> {
    parse_ddl_with_progress(contents, None)
}

/// Like [`parse_ddl`], incrementing `bar` once per parsed batch.
///
/// Segments that are empty after trimming (e.g. a trailing newline after
/// the final `go;`) are skipped rather than treated as broken batches.
pub fn parse_ddl_with_progress(
    contents: &str,
    bar: Option<&ProgressBar>,
) -> Result<Vec<Record>> {
    let batches: Vec<&str> = BATCH_TERMINATOR_RE
        .split(contents)
        .filter(|segment| !segment.trim().is_empty())
        .collect();

    if let Some(b) = bar {
        b.set_length(batches.len() as u64);
    }

    let mut records = Vec::with_capacity(batches.len());
    for batch in batches {
        records.push(parse_insert(batch)?);
        if let Some(b) = bar {
            b.inc(1);
        }
    }
    Ok(records)
}

/// Read a dump file and parse it in one call.
pub fn read_parse_file(path: &Path) -> Result<Vec<Record>> {
    let contents = std::fs::read_to_string(path).map_err(|e| DdlJsonError::ReadError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_ddl(&contents)
}
