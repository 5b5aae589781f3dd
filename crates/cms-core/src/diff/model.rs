//! Changeset types produced by the diff engine.
//!
//! Collections are `Vec`s in a deterministic order and translation maps are
//! `BTreeMap`s, so identical inputs serialize to identical bytes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

use crate::model::{FieldValue, Record, Translation};

/// The minimal set of mutations that brings the remote record in line with
/// the working copy.
///
/// Each list is applied by the remote source as an independent operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Changeset {
    /// Schema record type the changeset was computed for
    pub record_type: String,
    /// Id of the record being edited (empty for an unsaved singleton)
    pub record_id: String,
    /// Scalar fields whose working value differs
    pub field_changes: Vec<FieldChange>,
    /// Per-language translation fields that differ
    pub translation_changes: Vec<TranslationChange>,
    /// New children to persist, with all their translations
    pub child_creates: Vec<ChildCreate>,
    /// Persisted children whose compared fields differ
    pub child_updates: Vec<ChildUpdate>,
    /// Persisted children removed from the working copy
    pub child_deletes: Vec<ChildDelete>,
}

/// New value for one scalar field. `None` is sent as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub new_value: Option<FieldValue>,
}

/// Changed fields of one language of one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationChange {
    pub record_id: String,
    pub language: String,
    /// Only the fields that differ, never the whole translation
    pub changed_fields: Translation,
}

/// A child to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildCreate {
    pub collection: String,
    /// Full payload; `child.id` is the local placeholder
    pub child: Record,
}

/// Field and translation changes for one persisted child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildUpdate {
    pub collection: String,
    pub child_id: String,
    #[serde(default)]
    pub field_changes: Vec<FieldChange>,
    #[serde(default)]
    pub translation_changes: Vec<TranslationChange>,
}

/// A persisted child to delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildDelete {
    pub collection: String,
    pub child_id: String,
}

impl Changeset {
    /// An empty changeset is a no-op: callers skip the network call.
    pub fn is_empty(&self) -> bool {
        self.field_changes.is_empty()
            && self.translation_changes.is_empty()
            && self.child_creates.is_empty()
            && self.child_updates.is_empty()
            && self.child_deletes.is_empty()
    }

    /// Number of individual operations across all lists
    pub fn change_count(&self) -> usize {
        self.field_changes.len()
            + self.translation_changes.len()
            + self.child_creates.len()
            + self.child_updates.len()
            + self.child_deletes.len()
    }

    /// Ids of children to create (their placeholder ids)
    pub fn created_child_ids(&self) -> BTreeSet<&str> {
        self.child_creates
            .iter()
            .map(|c| c.child.id.as_str())
            .collect()
    }

    pub fn updated_child_ids(&self) -> BTreeSet<&str> {
        self.child_updates
            .iter()
            .map(|u| u.child_id.as_str())
            .collect()
    }

    pub fn deleted_child_ids(&self) -> BTreeSet<&str> {
        self.child_deletes
            .iter()
            .map(|d| d.child_id.as_str())
            .collect()
    }

    /// SHA-256 of the canonical JSON form, hex encoded.
    ///
    /// Identical changesets share a digest, which lets the remote source
    /// recognise a retried submission.
    pub fn digest(&self) -> String {
        let canonical = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl ChildUpdate {
    pub fn is_empty(&self) -> bool {
        self.field_changes.is_empty() && self.translation_changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_changeset_is_empty() {
        let cs = Changeset::default();
        assert!(cs.is_empty());
        assert_eq!(cs.change_count(), 0);
    }

    #[test]
    fn test_digest_is_stable_and_content_sensitive() {
        let mut a = Changeset {
            record_type: "category".to_string(),
            record_id: "c1".to_string(),
            ..Changeset::default()
        };
        let b = a.clone();
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 64);

        a.field_changes.push(FieldChange {
            field: "icon_svg_url".to_string(),
            new_value: Some(FieldValue::from("/icons/steel.svg")),
        });
        assert_ne!(a.digest(), b.digest());
        assert!(!a.is_empty());
    }
}
