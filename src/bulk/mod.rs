//! Bulk record mapper.
//!
//! Parses an uploaded CSV of student records, validates it, and forwards the
//! full ordered record sequence to the render boundary in a single call. One
//! rendered record per CSV row, in row order, assembled into one document.

pub mod csv_template;
pub mod handlers;

use std::collections::HashMap;

use thiserror::Error;

use crate::pdf::{GeneratedDocument, RecordRenderer, RenderError};

/// User-data problems detected before any render is attempted.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("CSV file is empty")]
    EmptyInput,
    #[error("CSV must contain a \"name\" column")]
    MissingRequiredColumn,
    #[error("row {0} is missing a \"name\" value")]
    MissingName(usize),
    #[error("failed to parse CSV: {0}")]
    Parse(String),
}

/// Failure modes of the bulk path.
#[derive(Debug, Error)]
pub enum BulkError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Parse raw CSV bytes into an ordered sequence of row mappings.
///
/// First row is the header; each subsequent row becomes one column→value
/// mapping. Row order is preserved. Parse errors abort the whole operation.
pub fn parse_records(data: &[u8]) -> Result<Vec<HashMap<String, String>>, ValidationError> {
    // Flexible: a short row simply lacks its trailing columns; the renderer
    // defaults missing keys to empty.
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| ValidationError::Parse(e.to_string()))?
        .clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ValidationError::Parse(e.to_string()))?;
        let row: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Validate parsed records before rendering.
///
/// Every row must carry a `name`; the first offender aborts the whole batch,
/// so no partial output is ever produced.
pub fn validate_records(rows: &[HashMap<String, String>]) -> Result<(), ValidationError> {
    if rows.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if rows[0].get("name").map(String::as_str).unwrap_or("").is_empty() {
        return Err(ValidationError::MissingRequiredColumn);
    }

    for (index, row) in rows.iter().enumerate().skip(1) {
        if row.get("name").map(String::as_str).unwrap_or("").is_empty() {
            // 1-based and counting the header line, matching what the user
            // sees in a spreadsheet.
            return Err(ValidationError::MissingName(index + 2));
        }
    }

    Ok(())
}

/// Validate `rows` and render them as one multi-record document.
pub fn process_records(
    rows: Vec<HashMap<String, String>>,
    renderer: &dyn RecordRenderer,
) -> Result<GeneratedDocument, BulkError> {
    validate_records(&rows)?;
    let document = renderer.render(&rows)?;
    Ok(document)
}
