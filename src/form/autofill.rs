//! Autofill engine.
//!
//! Derives the full set of (field name, value) pairs to overwrite when the
//! user picks a grade for a whole term. Pure function of its inputs; the
//! caller merges the result into the form store, so unrelated keys are never
//! touched.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::template::GradeScheme;

/// Academic period selector for autofill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    Term1,
    Term2,
    Final,
}

impl Term {
    fn suffix(&self) -> &'static str {
        match self {
            Term::Term1 => "term1",
            Term::Term2 => "term2",
            Term::Final => "total",
        }
    }
}

/// Derive the autofill mapping for one grade and term.
///
/// Term-wise scheme: every subject gets oral/written/total entries for
/// `term1`/`term2`, or a single `{subject}-total` for the final aggregate;
/// every trait gets `{trait}-{term}` or `{trait}-total`. Flat scheme: every
/// scalar subject maps directly to the grade, whatever the term.
pub fn autofill(
    grade: &str,
    term: Term,
    subjects: &BTreeSet<String>,
    traits: &BTreeSet<String>,
    scheme: GradeScheme,
) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    match scheme {
        GradeScheme::TermWise => {
            let suffix = term.suffix();
            for subject in subjects {
                match term {
                    Term::Term1 | Term::Term2 => {
                        fields.insert(format!("{subject}-oral-{suffix}"), grade.to_string());
                        fields.insert(format!("{subject}-written-{suffix}"), grade.to_string());
                        fields.insert(format!("{subject}-total-{suffix}"), grade.to_string());
                    }
                    Term::Final => {
                        fields.insert(format!("{subject}-total"), grade.to_string());
                    }
                }
            }
            for trait_name in traits {
                fields.insert(format!("{trait_name}-{suffix}"), grade.to_string());
            }
        }
        GradeScheme::Flat => {
            for subject in subjects {
                fields.insert(subject.clone(), grade.to_string());
            }
            for trait_name in traits {
                fields.insert(trait_name.clone(), grade.to_string());
            }
        }
    }

    fields
}
