//! Snapshot diff computation engine.
//!
//! The entry point is [`diff`], which compares the immutable snapshot of a
//! record with its edited working copy under a [`FieldSchema`] and produces a
//! [`Changeset`].
//!
//! The engine never fails. Missing sections on either side are treated as
//! absent: a language missing from the snapshot compares against empty
//! values, a child unknown to the snapshot becomes a create, and a field the
//! working copy does not carry is not compared at all.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::diff::model::{
    Changeset, ChildCreate, ChildDelete, ChildUpdate, FieldChange, TranslationChange,
};
use crate::model::{FieldValue, Record, Translation};
use crate::schema::{EmptyPolicy, FieldKind, FieldSchema, ScalarField};

/// Compute the minimal changeset between `original` and `working`.
///
/// Output order is deterministic: scalar fields follow schema order,
/// languages sort by code, creates and updates follow the working
/// collection order, deletes follow the original collection order.
pub fn diff(original: &Record, working: &Record, schema: &FieldSchema) -> Changeset {
    let record_id = if working.id.is_empty() {
        original.id.clone()
    } else {
        working.id.clone()
    };

    let mut changeset = Changeset {
        record_type: schema.record_type.clone(),
        field_changes: diff_fields(original, working, schema),
        translation_changes: diff_translations(&record_id, original, working, schema),
        record_id,
        ..Changeset::default()
    };

    for (collection, child_schema) in &schema.children {
        diff_collection(
            collection,
            original.collection(collection),
            working.collection(collection),
            schema,
            child_schema,
            &mut changeset,
        );
    }

    changeset
}

fn diff_fields(original: &Record, working: &Record, schema: &FieldSchema) -> Vec<FieldChange> {
    schema
        .scalar_fields
        .iter()
        .filter_map(|field| {
            compare_scalar(
                field,
                original.field(&field.name),
                working.field(&field.name),
                schema.empty_policy,
            )
            .map(|new_value| FieldChange {
                field: field.name.clone(),
                new_value,
            })
        })
        .collect()
}

/// Returns `Some(emitted value)` when the field changed.
fn compare_scalar(
    field: &ScalarField,
    old: Option<&FieldValue>,
    new: Option<&FieldValue>,
    policy: EmptyPolicy,
) -> Option<Option<FieldValue>> {
    if field.kind == FieldKind::KeyedUrlSet {
        if let (Some(old_set), Some(new_set)) = (canonical_url_set(old), canonical_url_set(new)) {
            return (old_set != new_set).then(|| Some(FieldValue::Text(new_set)));
        }
        tracing::warn!(
            field = %field.name,
            "keyed URL set is not a JSON object; comparing as plain text"
        );
    }

    let changed = match policy {
        EmptyPolicy::AbsentEqualsEmpty => text_or_empty(old) != text_or_empty(new),
        EmptyPolicy::Strict => match (old, new) {
            (None, None) => false,
            (Some(a), Some(b)) => a.canonical_text() != b.canonical_text(),
            _ => true,
        },
    };
    changed.then(|| new.cloned())
}

fn text_or_empty(value: Option<&FieldValue>) -> String {
    value.map(FieldValue::canonical_text).unwrap_or_default()
}

/// Canonical serialization of a name → URL object stored as text.
///
/// Rows with a blank name or blank URL are dropped, keys are sorted.
/// Absent or blank text is the empty set. Returns `None` if the text is not
/// a JSON object.
pub fn canonical_url_set(value: Option<&FieldValue>) -> Option<String> {
    let text = match value {
        None => return Some("{}".to_string()),
        Some(v) => v.canonical_text(),
    };
    if text.trim().is_empty() {
        return Some("{}".to_string());
    }
    let parsed: serde_json::Map<String, Value> = serde_json::from_str(&text).ok()?;
    let links: BTreeMap<String, String> = parsed
        .into_iter()
        .filter_map(|(name, url)| match url {
            Value::String(url) if !name.trim().is_empty() && !url.trim().is_empty() => {
                Some((name, url))
            }
            _ => None,
        })
        .collect();
    serde_json::to_string(&links).ok()
}

fn diff_translations(
    record_id: &str,
    original: &Record,
    working: &Record,
    schema: &FieldSchema,
) -> Vec<TranslationChange> {
    working
        .translations
        .iter()
        .filter_map(|(language, new_translation)| {
            let changed = diff_translation(
                original.translations.get(language),
                new_translation,
                schema,
            );
            (!changed.is_empty()).then(|| TranslationChange {
                record_id: record_id.to_string(),
                language: language.clone(),
                changed_fields: changed,
            })
        })
        .collect()
}

fn diff_translation(
    old: Option<&Translation>,
    new: &Translation,
    schema: &FieldSchema,
) -> Translation {
    schema
        .translatable_fields
        .iter()
        .filter_map(|field| {
            let new_value = new.get(field)?;
            let old_value = old.and_then(|t| t.get(field));
            let changed = match (schema.empty_policy, old_value) {
                (EmptyPolicy::Strict, None) => true,
                (_, old_value) => old_value.map(String::as_str).unwrap_or("") != new_value,
            };
            changed.then(|| (field.clone(), new_value.clone()))
        })
        .collect()
}

/// Partition one child collection into creates, updates and deletes.
///
/// Each child id lands in at most one of the three lists.
fn diff_collection(
    collection: &str,
    original: &[Record],
    working: &[Record],
    owner: &FieldSchema,
    child_schema: &FieldSchema,
    changeset: &mut Changeset,
) {
    let mut original_by_id: HashMap<&str, &Record> = HashMap::new();
    for child in original {
        if !child.id.is_empty() {
            original_by_id.entry(child.id.as_str()).or_insert(child);
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for child in working {
        if !child.id.is_empty() && !seen.insert(child.id.as_str()) {
            tracing::warn!(
                collection,
                child_id = %child.id,
                "duplicate child id in working copy; later occurrence ignored"
            );
            continue;
        }

        let persisted = (!owner.is_pending(&child.id))
            .then(|| original_by_id.get(child.id.as_str()))
            .flatten();

        match persisted {
            Some(before) => {
                let update = ChildUpdate {
                    collection: collection.to_string(),
                    child_id: child.id.clone(),
                    field_changes: diff_fields(before, child, child_schema),
                    translation_changes: diff_translations(&child.id, before, child, child_schema),
                };
                if !update.is_empty() {
                    changeset.child_updates.push(update);
                }
            }
            // A pending child identical in both copies is not a change
            None if original_by_id.get(child.id.as_str()) == Some(&child) => {}
            None => {
                if child.has_content(child_schema) {
                    changeset.child_creates.push(ChildCreate {
                        collection: collection.to_string(),
                        child: child.clone(),
                    });
                }
            }
        }
    }

    let mut deleted: HashSet<&str> = HashSet::new();
    for child in original {
        let id = child.id.as_str();
        if id.is_empty() || owner.is_pending(id) || seen.contains(id) || !deleted.insert(id) {
            continue;
        }
        changeset.child_deletes.push(ChildDelete {
            collection: collection.to_string(),
            child_id: id.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(name: &str) -> ScalarField {
        ScalarField {
            name: name.to_string(),
            kind: FieldKind::Plain,
            derived: false,
        }
    }

    #[test]
    fn test_absent_equals_empty_but_emits_verbatim() {
        let field = plain("description");
        assert_eq!(
            compare_scalar(
                &field,
                None,
                Some(&FieldValue::from("")),
                EmptyPolicy::AbsentEqualsEmpty
            ),
            None
        );
        assert_eq!(
            compare_scalar(
                &field,
                Some(&FieldValue::from("old")),
                None,
                EmptyPolicy::AbsentEqualsEmpty
            ),
            Some(None)
        );
    }

    #[test]
    fn test_strict_policy_reports_absent_versus_empty() {
        let field = plain("description");
        assert_eq!(
            compare_scalar(&field, None, Some(&FieldValue::from("")), EmptyPolicy::Strict),
            Some(Some(FieldValue::from("")))
        );
    }

    #[test]
    fn test_canonical_url_set_sorts_and_drops_blank_rows() {
        let value = FieldValue::from(r#"{"twitter": "https://t.co/x", "": "https://a", "blank": ""}"#);
        assert_eq!(
            canonical_url_set(Some(&value)).as_deref(),
            Some(r#"{"twitter":"https://t.co/x"}"#)
        );
        assert_eq!(canonical_url_set(None).as_deref(), Some("{}"));
        assert_eq!(canonical_url_set(Some(&FieldValue::from("not json"))), None);
    }

    #[test]
    fn test_language_missing_from_original_compares_against_empty() {
        let schema = FieldSchema::new("category").translatable("name");
        let original = Record::new("c1").with_translation("en", "name", "Steel");
        let working = original
            .clone()
            .with_translation("tr", "name", "")
            .with_translation("fr", "name", "Acier");
        let changes = diff_translations("c1", &original, &working, &schema);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].language, "fr");
    }
}
