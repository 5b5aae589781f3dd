use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::value::FieldValue;
use crate::schema::FieldSchema;

/// Field name → localized text for one language
pub type Translation = BTreeMap<String, String>;

/// Language code → translation
pub type TranslationSet = BTreeMap<String, Translation>;

/// Ordered list of child records of one kind
pub type ChildCollection = Vec<Record>;

/// A CMS record: an About-Us document, a category, a project, or a child of one
///
/// Every section defaults to empty when missing from the payload, so legacy
/// records without translations or children still deserialize.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Server-assigned id, or a pending placeholder for locally added children
    #[serde(default)]
    pub id: String,

    /// Scalar fields; `None` is an explicit null
    #[serde(default)]
    pub fields: BTreeMap<String, Option<FieldValue>>,

    /// Per-language field values
    #[serde(default)]
    pub translations: TranslationSet,

    /// Child collections by collection name (e.g. `services`, `images`)
    #[serde(default)]
    pub children: BTreeMap<String, ChildCollection>,
}

impl Record {
    /// Create an empty record with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), Some(value.into()));
        self
    }

    pub fn with_null_field(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into(), None);
        self
    }

    pub fn with_translation(
        mut self,
        language: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.translations
            .entry(language.into())
            .or_default()
            .insert(field.into(), value.into());
        self
    }

    pub fn with_child(mut self, collection: impl Into<String>, child: Record) -> Self {
        self.children
            .entry(collection.into())
            .or_default()
            .push(child);
        self
    }

    /// Scalar value, treating missing and null alike
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).and_then(Option::as_ref)
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: Option<FieldValue>) {
        self.fields.insert(name.into(), value);
    }

    pub fn translation(&self, language: &str, field: &str) -> Option<&str> {
        self.translations
            .get(language)
            .and_then(|t| t.get(field))
            .map(String::as_str)
    }

    pub fn set_translation(
        &mut self,
        language: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.translations
            .entry(language.into())
            .or_default()
            .insert(field.into(), value.into());
    }

    /// Children of a collection; empty when the collection is absent
    pub fn collection(&self, name: &str) -> &[Record] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn child(&self, collection: &str, child_id: &str) -> Option<&Record> {
        self.collection(collection).iter().find(|c| c.id == child_id)
    }

    pub fn child_mut(&mut self, collection: &str, child_id: &str) -> Option<&mut Record> {
        self.children
            .get_mut(collection)
            .and_then(|children| children.iter_mut().find(|c| c.id == child_id))
    }

    /// True if any user-entered schema field (scalar or translated, in any
    /// language) holds a non-blank value. Derived scalars do not count.
    pub fn has_content(&self, schema: &FieldSchema) -> bool {
        let scalar = schema
            .scalar_fields
            .iter()
            .filter(|f| !f.derived)
            .filter_map(|f| self.field(&f.name))
            .any(|v| !v.is_blank());
        if scalar {
            return true;
        }
        self.translations.values().any(|translation| {
            schema
                .translatable_fields
                .iter()
                .filter_map(|f| translation.get(f))
                .any(|v| !v.trim().is_empty())
        })
    }
}
