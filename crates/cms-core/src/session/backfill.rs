//! Translation backfill for freshly fetched records

use crate::model::{Record, Translation};
use crate::schema::FieldSchema;

/// Give every known language an entry for every translatable field.
///
/// Missing languages and missing fields are filled with empty strings;
/// existing values are left alone. Applies to the record and, recursively,
/// to every child collection the schema names.
///
/// A legacy record that has no translations at all but carries top-level
/// values named like translatable fields (older projects stored `title` as a
/// plain field) has those values copied into every language first.
pub fn backfill_languages(record: &mut Record, schema: &FieldSchema, languages: &[String]) {
    if record.translations.is_empty() && !schema.translatable_fields.is_empty() {
        let legacy: Translation = schema
            .translatable_fields
            .iter()
            .filter_map(|f| record.field(f).map(|v| (f.clone(), v.canonical_text())))
            .collect();
        if !legacy.is_empty() {
            tracing::debug!(
                record_id = %record.id,
                fields = legacy.len(),
                "seeding translations from legacy fields"
            );
            for language in languages {
                record.translations.insert(language.clone(), legacy.clone());
            }
        }
    }

    if !schema.translatable_fields.is_empty() {
        for language in languages {
            let translation = record.translations.entry(language.clone()).or_default();
            for field in &schema.translatable_fields {
                translation.entry(field.clone()).or_default();
            }
        }
    }

    for (collection, child_schema) in &schema.children {
        if let Some(children) = record.children.get_mut(collection) {
            for child in children {
                backfill_languages(child, child_schema, languages);
            }
        }
    }
}
