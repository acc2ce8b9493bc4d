//! PDF assembly boundary.
//!
//! Wraps the external Typst engine: a template schema plus one or more input
//! mappings goes in, a binary PDF comes out. One rendered record per input,
//! in sequence order. Engine failures are surfaced as-is, never retried.

pub mod common;
pub mod engine;
pub mod handlers;
pub mod layout;

pub use engine::TypstRenderEngine;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::template::TemplateSchema;

/// Errors that can occur while rendering a PDF.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write Typst source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("Typst CLI execution failed: {0}")]
    TypstIo(#[source] std::io::Error),
    #[error("Typst CLI exited with status {0}")]
    TypstExit(i32),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
}

/// Result of a successful render.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
}

/// Render seam for the bulk mapper and handlers, mockable in tests.
pub trait RecordRenderer {
    fn render(&self, inputs: &[HashMap<String, String>]) -> Result<GeneratedDocument, RenderError>;
}

/// Renders records against one loaded template schema.
pub struct TemplateRenderer {
    template: Arc<TemplateSchema>,
    output_name: String,
}

impl TemplateRenderer {
    pub fn new(template: Arc<TemplateSchema>, output_name: impl Into<String>) -> Self {
        Self {
            template,
            output_name: output_name.into(),
        }
    }
}

impl RecordRenderer for TemplateRenderer {
    fn render(&self, inputs: &[HashMap<String, String>]) -> Result<GeneratedDocument, RenderError> {
        let source = layout::build_typst_source(&self.template, inputs);
        TypstRenderEngine::render(&source, &self.output_name)
    }
}
