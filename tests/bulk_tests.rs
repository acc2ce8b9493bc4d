use std::collections::HashMap;
use std::sync::Mutex;

use report_card_server::bulk::{parse_records, process_records, validate_records, BulkError, ValidationError};
use report_card_server::pdf::{GeneratedDocument, RecordRenderer, RenderError};

/// Records the inputs it was asked to render.
struct RecordingRenderer {
    inputs_seen: Mutex<Vec<usize>>,
}

impl RecordingRenderer {
    fn new() -> Self {
        Self {
            inputs_seen: Mutex::new(Vec::new()),
        }
    }
}

impl RecordRenderer for RecordingRenderer {
    fn render(
        &self,
        inputs: &[HashMap<String, String>],
    ) -> Result<GeneratedDocument, RenderError> {
        self.inputs_seen.lock().unwrap().push(inputs.len());
        Ok(GeneratedDocument {
            filename: "all-student-results.pdf".to_string(),
            pdf: b"%PDF-1.7".to_vec(),
        })
    }
}

fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_empty_sequence_fails_with_empty_input() {
    assert!(matches!(
        validate_records(&[]),
        Err(ValidationError::EmptyInput)
    ));
}

#[test]
fn test_first_row_without_name_fails_with_missing_column() {
    let rows = vec![row(&[("foo", "bar")])];
    assert!(matches!(
        validate_records(&rows),
        Err(ValidationError::MissingRequiredColumn)
    ));
}

#[test]
fn test_first_row_with_empty_name_fails_with_missing_column() {
    let rows = vec![row(&[("name", "")])];
    assert!(matches!(
        validate_records(&rows),
        Err(ValidationError::MissingRequiredColumn)
    ));
}

#[test]
fn test_later_row_without_name_fails_fast_with_row_number() {
    let rows = vec![
        row(&[("name", "Asha")]),
        row(&[("name", "Rohan")]),
        row(&[("name", "")]),
    ];
    match validate_records(&rows) {
        // Spreadsheet row numbering: header is row 1, first record row 2.
        Err(ValidationError::MissingName(4)) => {}
        other => panic!("expected MissingName(4), got {other:?}"),
    }
}

#[test]
fn test_valid_single_record_invokes_render_boundary_once() {
    let renderer = RecordingRenderer::new();
    let rows = vec![row(&[("name", "Asha")])];

    let document = process_records(rows, &renderer).unwrap();
    assert!(!document.pdf.is_empty());
    assert_eq!(*renderer.inputs_seen.lock().unwrap(), vec![1]);
}

#[test]
fn test_validation_failure_never_invokes_render_boundary() {
    let renderer = RecordingRenderer::new();
    let result = process_records(Vec::new(), &renderer);

    assert!(matches!(
        result,
        Err(BulkError::Validation(ValidationError::EmptyInput))
    ));
    assert!(renderer.inputs_seen.lock().unwrap().is_empty());
}

#[test]
fn test_parse_records_preserves_order_and_headers() {
    let data = b"name,class,english-oral-term1\nAsha,Senior KG,A+\n\"Rohan Patel\",Senior KG,A\n";
    let rows = parse_records(data).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("english-oral-term1").map(String::as_str), Some("A+"));
    assert_eq!(rows[1].get("name").map(String::as_str), Some("Rohan Patel"));
}

#[test]
fn test_non_utf8_csv_is_a_parse_error() {
    let data = b"name,class\n\xff\xfe,KG\n";
    assert!(matches!(
        parse_records(data),
        Err(ValidationError::Parse(_))
    ));
}

#[test]
fn test_short_rows_simply_lack_trailing_columns() {
    let data = b"name,class\nAsha\n";
    let rows = parse_records(data).unwrap();
    assert_eq!(rows[0].get("name").map(String::as_str), Some("Asha"));
    assert!(rows[0].get("class").is_none());
}
