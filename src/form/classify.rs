//! Field classifier.
//!
//! Partitions a template's field names into personal fields, subject roots
//! and personality-trait roots based on the `-` naming convention. Names
//! without a separator are personal. Compound names are matched by their
//! root segment against the category's trait vocabulary first, then its
//! subject vocabulary. Play Group subjects are whole scalar field names
//! (some contain `-` themselves), so whole-name membership is checked before
//! splitting.

use std::collections::BTreeSet;

use serde::Serialize;
use utoipa::ToSchema;

use crate::template::CategoryProfile;

/// Derived partition of a template's field names.
///
/// `subjects` and `traits` hold root names, not full field names. `BTreeSet`
/// keeps iteration order stable for consumers that render per-category lists.
#[derive(Debug, Default, Clone, Serialize, ToSchema)]
pub struct CategoryPartition {
    pub personal: Vec<String>,
    pub subjects: BTreeSet<String>,
    pub traits: BTreeSet<String>,
}

/// Classify an ordered sequence of field names.
///
/// Unrecognized compound roots are dropped from every category view; the
/// drop is logged so misspelled template fields do not vanish silently.
pub fn classify(names: &[String], profile: &CategoryProfile) -> CategoryPartition {
    let mut partition = CategoryPartition::default();

    for name in names {
        if !name.contains('-') {
            partition.personal.push(name.clone());
            continue;
        }

        // Flat-scheme subjects ("english-A-to-Z", "fruits-and-vegetables")
        // match as whole names, not by root.
        if profile.is_subject(name) {
            partition.subjects.insert(name.clone());
            continue;
        }

        let root = name.split('-').next().unwrap_or_default();
        if profile.is_trait(root) {
            partition.traits.insert(root.to_string());
        } else if profile.is_subject(root) {
            partition.subjects.insert(root.to_string());
        } else {
            log::warn!(
                "template field {:?} has unrecognized root {:?}; dropped from categorization",
                name,
                root
            );
        }
    }

    partition
}
