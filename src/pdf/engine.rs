//! Typst rendering engine.
//!
//! Handles the low-level details of writing Typst source to temporary files,
//! invoking the compiler, and reading back the output PDF.

use std::fs;
use std::process::Command;
use tempfile::tempdir;
use tempfile::TempDir;

use super::common::sanitize_filename;
use super::{GeneratedDocument, RenderError};

const SOURCE_FILE: &str = "report-card.typ";

/// Stateless engine for rendering Typst source to PDF.
pub struct TypstRenderEngine;

impl TypstRenderEngine {
    /// Render a Typst string to a PDF document.
    ///
    /// # Arguments
    /// * `typst_source` - The complete Typst source code string.
    /// * `output_name_base` - The base name for the output file (e.g., the student's name).
    pub fn render(
        typst_source: &str,
        output_name_base: &str,
    ) -> Result<GeneratedDocument, RenderError> {
        let temp_dir = tempdir().map_err(RenderError::TempDir)?;
        let typ_path = temp_dir.path().join(SOURCE_FILE);

        fs::write(&typ_path, typst_source).map_err(RenderError::WriteSource)?;

        let safe_name = sanitize_filename(output_name_base, "result");
        let output_filename = format!("{safe_name}.pdf");

        let pdf = compile_typst_to_pdf(&temp_dir, &output_filename)?;

        Ok(GeneratedDocument {
            filename: output_filename,
            pdf,
        })
    }
}

/// Compile the Typst source file in `temp_dir` to PDF.
fn compile_typst_to_pdf(temp_dir: &TempDir, output_filename: &str) -> Result<Vec<u8>, RenderError> {
    let typ_path = temp_dir.path().join(SOURCE_FILE);
    let output_path = temp_dir.path().join(output_filename);

    let status = Command::new("typst")
        .arg("compile")
        .arg(&typ_path)
        .arg(&output_path)
        .current_dir(temp_dir.path())
        .status()
        .map_err(RenderError::TypstIo)?;

    if !status.success() {
        return Err(RenderError::TypstExit(status.code().unwrap_or(-1)));
    }

    fs::read(&output_path).map_err(RenderError::ReadPdf)
}
