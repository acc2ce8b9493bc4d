//! Template CSV artifact.
//!
//! The bulk upload page offers a downloadable reference CSV with the
//! canonical header order and two example rows, so users can see which
//! columns the renderer expects.

use csv::WriterBuilder;

use crate::form::classify::CategoryPartition;
use crate::template::{CategoryProfile, GradeScheme};

const EXAMPLE_NAMES: [&str; 2] = ["Ananya Sharma", "Rohan Patel"];
const EXAMPLE_GRADES: [&str; 2] = ["A+", "A"];

/// Canonical column order: personal fields in template order, then subject
/// grade columns grouped category-within-term, then trait columns per term.
pub fn canonical_headers(profile: &CategoryProfile, partition: &CategoryPartition) -> Vec<String> {
    // Flat-scheme vocabularies contain dash-free scalar subjects that the
    // classifier files under personal; the subject loop below owns those.
    let mut headers: Vec<String> = partition
        .personal
        .iter()
        .filter(|name| !profile.is_subject(name.as_str()))
        .cloned()
        .collect();

    match profile.scheme {
        GradeScheme::TermWise => {
            for term in ["term1", "term2"] {
                for category in ["oral", "written", "total"] {
                    for subject in profile.subjects {
                        headers.push(format!("{subject}-{category}-{term}"));
                    }
                }
            }
            for subject in profile.subjects {
                headers.push(format!("{subject}-total"));
            }
            for term in ["term1", "term2", "total"] {
                for trait_name in profile.traits {
                    headers.push(format!("{trait_name}-{term}"));
                }
            }
        }
        GradeScheme::Flat => {
            for subject in profile.subjects {
                headers.push(subject.to_string());
            }
        }
    }

    headers
}

/// Build the template CSV: canonical headers plus two example records.
pub fn template_csv(
    profile: &CategoryProfile,
    partition: &CategoryPartition,
) -> Result<String, csv::Error> {
    let headers = canonical_headers(profile, partition);
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(&headers)?;

    for (name, grade) in EXAMPLE_NAMES.iter().zip(EXAMPLE_GRADES) {
        let row: Vec<&str> = headers
            .iter()
            .map(|header| {
                if header == "name" {
                    *name
                } else if partition.personal.contains(header) {
                    ""
                } else {
                    grade
                }
            })
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
