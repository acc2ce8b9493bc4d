//! Class category profiles.
//!
//! The Kindergarten and Play Group report cards share one code path but use
//! different field vocabularies and grading schemes. Everything that differs
//! between the two lives here, so the classifier, autofill and CSV layers
//! stay category-agnostic.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The two report-card variants served by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassCategory {
    Kindergarten,
    PlayGroup,
}

impl ClassCategory {
    pub const ALL: [ClassCategory; 2] = [ClassCategory::Kindergarten, ClassCategory::PlayGroup];

    /// Parse the URL path segment used by the API (`kindergarten` / `playgroup`).
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "kindergarten" => Some(ClassCategory::Kindergarten),
            "playgroup" => Some(ClassCategory::PlayGroup),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ClassCategory::Kindergarten => "kindergarten",
            ClassCategory::PlayGroup => "playgroup",
        }
    }

    pub fn profile(&self) -> &'static CategoryProfile {
        match self {
            ClassCategory::Kindergarten => &KINDERGARTEN,
            ClassCategory::PlayGroup => &PLAY_GROUP,
        }
    }
}

/// How a category's subjects are graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeScheme {
    /// Each subject has oral/written/total marks per term plus a final total.
    TermWise,
    /// Each subject is a single scalar grade field.
    Flat,
}

/// Static configuration for one class category.
#[derive(Debug)]
pub struct CategoryProfile {
    pub category: ClassCategory,
    /// Recognized subject vocabulary. Roots of compound field names for
    /// `TermWise` categories, whole scalar field names for `Flat` ones.
    pub subjects: &'static [&'static str],
    /// Recognized personality-trait roots.
    pub traits: &'static [&'static str],
    pub scheme: GradeScheme,
    /// Template schema file under `static/`.
    pub template_file: &'static str,
    /// Persisted form-state object name.
    pub store_file: &'static str,
    /// Download filename when the form has no student name.
    pub fallback_pdf_name: &'static str,
}

impl CategoryProfile {
    pub fn is_subject(&self, token: &str) -> bool {
        self.subjects.contains(&token)
    }

    pub fn is_trait(&self, token: &str) -> bool {
        self.traits.contains(&token)
    }
}

pub static KINDERGARTEN: CategoryProfile = CategoryProfile {
    category: ClassCategory::Kindergarten,
    subjects: &[
        "english",
        "math",
        "hindi",
        "englishrhymes",
        "hindirhymes",
        "evs",
        "drawing",
        "moral",
    ],
    traits: &["hygiene", "general", "confidence", "participation"],
    scheme: GradeScheme::TermWise,
    template_file: "kindergarten.json",
    store_file: "kindergarten-form.json",
    fallback_pdf_name: "school-result.pdf",
};

pub static PLAY_GROUP: CategoryProfile = CategoryProfile {
    category: ClassCategory::PlayGroup,
    subjects: &[
        "english-A-to-Z",
        "math-1-to-10",
        "hindi",
        "rhymes",
        "drawing",
        "fruits-and-vegetables",
        "bird-and-animals",
        "transport-and-flowers",
        "parts-of-body",
        "hygiene",
        "general-behavior",
        "confidence",
        "participation",
        "days-and-colours",
    ],
    traits: &[],
    scheme: GradeScheme::Flat,
    template_file: "playgroup.json",
    store_file: "playgroup-form.json",
    fallback_pdf_name: "playgroup-result.pdf",
};
