//! Template-to-Typst translation.
//!
//! Turns a template schema plus an ordered sequence of input mappings into
//! one Typst source string: absolutely positioned text per field, one page
//! sequence per record. Missing keys render as empty and are skipped.

use std::collections::HashMap;
use std::fmt::Write;

use super::common::escape_typst_string;
use crate::template::TemplateSchema;

/// Build the complete Typst source for `inputs` against `template`.
pub fn build_typst_source(
    template: &TemplateSchema,
    inputs: &[HashMap<String, String>],
) -> String {
    let mut source = String::new();
    let _ = writeln!(
        source,
        "#set page(width: {}mm, height: {}mm, margin: 0mm)",
        template.page.width, template.page.height
    );

    for (record_index, record) in inputs.iter().enumerate() {
        for (page_index, page) in template.schemas.iter().enumerate() {
            if record_index > 0 || page_index > 0 {
                source.push_str("#pagebreak()\n");
            }
            for field in page {
                let value = record.get(&field.name).map(String::as_str).unwrap_or("");
                if value.is_empty() {
                    continue;
                }
                let _ = writeln!(
                    source,
                    "#place(top + left, dx: {}mm, dy: {}mm, box(width: {}mm, text(size: {}pt, \"{}\")))",
                    field.position.x,
                    field.position.y,
                    field.width,
                    field.font_size,
                    escape_typst_string(value)
                );
            }
        }
    }

    source
}
