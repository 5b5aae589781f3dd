//! Replaying a changeset onto a record
//!
//! This is what a remote source does with a submitted [`Changeset`]. The
//! in-memory remote uses it directly, and tests use it to check that
//! `apply_changeset(original, diff(original, working))` agrees with `working`
//! on every compared field.

use std::collections::BTreeMap;

use crate::diff::model::{Changeset, FieldChange, TranslationChange};
use crate::model::{FieldValue, Record};

/// Source of server-assigned ids for created children
pub trait IdSource {
    fn next_id(&mut self, collection: &str) -> String;
}

/// Ids of the form `{prefix}{n}`, counting from 1
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, _collection: &str) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Apply `changeset` to a copy of `original` and return the result.
///
/// Created children get a fresh id from `ids`. Any scalar field of the
/// record that referred to a created child's placeholder id (such as a
/// project's main image) is rewritten to the new id. Updates and deletes of
/// ids the record does not know are ignored.
pub fn apply_changeset(original: &Record, changeset: &Changeset, ids: &mut dyn IdSource) -> Record {
    let mut record = original.clone();
    if record.id.is_empty() && !changeset.record_id.is_empty() {
        record.id = changeset.record_id.clone();
    }

    apply_fields(&mut record, &changeset.field_changes);
    apply_translations(&mut record, &changeset.translation_changes);

    for update in &changeset.child_updates {
        if let Some(child) = record.child_mut(&update.collection, &update.child_id) {
            apply_fields(child, &update.field_changes);
            apply_translations(child, &update.translation_changes);
        }
    }

    for delete in &changeset.child_deletes {
        if let Some(children) = record.children.get_mut(&delete.collection) {
            children.retain(|c| c.id != delete.child_id);
        }
    }

    let mut assigned: BTreeMap<String, String> = BTreeMap::new();
    for create in &changeset.child_creates {
        let mut child = create.child.clone();
        let id = ids.next_id(&create.collection);
        assigned.insert(std::mem::replace(&mut child.id, id.clone()), id);
        record
            .children
            .entry(create.collection.clone())
            .or_default()
            .push(child);
    }

    for value in record.fields.values_mut().flatten() {
        let replacement = value.as_text().and_then(|text| assigned.get(text));
        if let Some(new_id) = replacement {
            *value = FieldValue::Text(new_id.clone());
        }
    }

    record
}

fn apply_fields(record: &mut Record, changes: &[FieldChange]) {
    for change in changes {
        record.set_field(change.field.clone(), change.new_value.clone());
    }
}

fn apply_translations(record: &mut Record, changes: &[TranslationChange]) {
    for change in changes {
        for (field, value) in &change.changed_fields {
            record.set_translation(change.language.clone(), field.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::engine::diff;
    use crate::schema::FieldSchema;

    fn project_schema() -> FieldSchema {
        FieldSchema::new("project")
            .scalar("main_image_id")
            .translatable("title")
            .child("images", FieldSchema::new("project_image").scalar("url"))
    }

    #[test]
    fn test_sequential_ids_count_up() {
        let mut ids = SequentialIds::new("img-");
        assert_eq!(ids.next_id("images"), "img-1");
        assert_eq!(ids.next_id("images"), "img-2");
    }

    #[test]
    fn test_created_child_reference_is_remapped() {
        let original = Record::new("p1")
            .with_field("main_image_id", "i1")
            .with_child("images", Record::new("i1").with_field("url", "/a.png"));
        let working = original
            .clone()
            .with_field("main_image_id", "pending-x")
            .with_child("images", Record::new("pending-x").with_field("url", "/b.png"));

        let changeset = diff(&original, &working, &project_schema());
        let saved = apply_changeset(&original, &changeset, &mut SequentialIds::new("img-"));

        assert_eq!(saved.field("main_image_id"), Some(&FieldValue::from("img-1")));
        let ids: Vec<&str> = saved.collection("images").iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["i1", "img-1"]);
    }

    #[test]
    fn test_unknown_update_and_delete_are_ignored() {
        let original = Record::new("p1").with_child("images", Record::new("i1"));
        let changeset = Changeset {
            record_type: "project".to_string(),
            record_id: "p1".to_string(),
            child_deletes: vec![crate::diff::model::ChildDelete {
                collection: "images".to_string(),
                child_id: "nope".to_string(),
            }],
            ..Changeset::default()
        };
        let saved = apply_changeset(&original, &changeset, &mut SequentialIds::default());
        assert_eq!(saved, original);
    }
}
