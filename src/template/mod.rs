//! Template schema module - the declarative PDF layout documents.
//!
//! A template is an externally supplied JSON document per class category
//! declaring field names, positions and rendering hints. The core only
//! consumes the `name` attribute; position and size are passed through to
//! the PDF layout.

pub mod profile;

pub use profile::{CategoryProfile, ClassCategory, GradeScheme};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use utoipa::ToSchema;

/// Errors raised while loading a template schema from disk.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template file: {0}")]
    Io(#[source] std::io::Error),
    #[error("failed to parse template schema: {0}")]
    Json(#[source] serde_json::Error),
}

/// Page dimensions in millimeters. Defaults to A4 portrait.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize {
            width: 210.0,
            height: 297.0,
        }
    }
}

/// Position of a field on the page, in millimeters from top-left.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

fn default_font_size() -> f64 {
    11.0
}

/// One field declaration in a template page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

/// A full template schema: ordered pages of ordered field descriptors.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSchema {
    #[serde(default)]
    pub page: PageSize,
    pub schemas: Vec<Vec<FieldDescriptor>>,
}

impl TemplateSchema {
    /// The set of field names to populate, in declaration order across all
    /// pages. Duplicate names are possible in a malformed template and are
    /// last-write-wins when used as mapping keys.
    pub fn field_names(&self) -> Vec<String> {
        self.schemas
            .iter()
            .flatten()
            .map(|field| field.name.clone())
            .collect()
    }
}

/// Get the static assets directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

/// Load the template schema for one class category from `static/`.
pub fn load_template(category: ClassCategory) -> Result<TemplateSchema, TemplateError> {
    let path = get_static_dir().join(category.profile().template_file);
    let raw = fs::read_to_string(&path).map_err(TemplateError::Io)?;
    serde_json::from_str(&raw).map_err(TemplateError::Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_preserve_declaration_order() {
        let schema: TemplateSchema = serde_json::from_str(
            r#"{
                "schemas": [[
                    {"name": "name", "position": {"x": 10.0, "y": 20.0}, "width": 60.0, "height": 8.0},
                    {"name": "english-oral-term1", "position": {"x": 30.0, "y": 80.0}, "width": 18.0, "height": 6.0, "fontSize": 9.0}
                ]]
            }"#,
        )
        .unwrap();

        assert_eq!(schema.field_names(), vec!["name", "english-oral-term1"]);
        assert_eq!(schema.page.width, 210.0);
        assert_eq!(schema.schemas[0][1].font_size, 9.0);
    }

    #[test]
    fn test_bundled_templates_deserialize() {
        for category in ClassCategory::ALL {
            let schema = load_template(category).expect("bundled template must load");
            assert!(!schema.field_names().is_empty());
        }
    }
}
