//! Field schemas: which fields of a record type are compared, and how
//!
//! A schema is a static description per record type. The diff engine never
//! looks at fields the schema does not name.

pub mod presets;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use presets::{RecordKind, DEFAULT_LANGUAGES};

/// Prefix given to ids of children created locally and not yet persisted
pub const DEFAULT_PENDING_PREFIX: &str = "pending-";

/// How a scalar field's value is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Compared by canonical text
    #[default]
    Plain,
    /// A JSON object of name → URL stored as a string (social links).
    /// Compared by sorted-key serialization.
    KeyedUrlSet,
}

/// Whether an absent/null value equals the empty string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPolicy {
    #[default]
    AbsentEqualsEmpty,
    Strict,
}

/// A scalar field named by a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarField {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    /// Maintained by the reducer (flags, ordering), not typed by the user.
    /// Still diffed, but never makes a pending child worth creating.
    #[serde(default)]
    pub derived: bool,
}

/// Comparison schema for one record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub record_type: String,
    #[serde(default)]
    pub scalar_fields: Vec<ScalarField>,
    #[serde(default)]
    pub translatable_fields: Vec<String>,
    /// Marks child ids in this record's collections as pending
    #[serde(default = "default_pending_prefix")]
    pub pending_prefix: String,
    #[serde(default)]
    pub empty_policy: EmptyPolicy,
    /// Schemas of child collections, by collection name
    #[serde(default)]
    pub children: BTreeMap<String, FieldSchema>,
}

fn default_pending_prefix() -> String {
    DEFAULT_PENDING_PREFIX.to_string()
}

impl FieldSchema {
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            scalar_fields: Vec::new(),
            translatable_fields: Vec::new(),
            pending_prefix: default_pending_prefix(),
            empty_policy: EmptyPolicy::default(),
            children: BTreeMap::new(),
        }
    }

    pub fn scalar(mut self, name: impl Into<String>) -> Self {
        self.scalar_fields.push(ScalarField {
            name: name.into(),
            kind: FieldKind::Plain,
            derived: false,
        });
        self
    }

    pub fn derived_scalar(mut self, name: impl Into<String>) -> Self {
        self.scalar_fields.push(ScalarField {
            name: name.into(),
            kind: FieldKind::Plain,
            derived: true,
        });
        self
    }

    pub fn keyed_url_set(mut self, name: impl Into<String>) -> Self {
        self.scalar_fields.push(ScalarField {
            name: name.into(),
            kind: FieldKind::KeyedUrlSet,
            derived: false,
        });
        self
    }

    pub fn translatable(mut self, name: impl Into<String>) -> Self {
        self.translatable_fields.push(name.into());
        self
    }

    pub fn pending_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.pending_prefix = prefix.into();
        self
    }

    pub fn empty_policy(mut self, policy: EmptyPolicy) -> Self {
        self.empty_policy = policy;
        self
    }

    pub fn child(mut self, collection: impl Into<String>, schema: FieldSchema) -> Self {
        self.children.insert(collection.into(), schema);
        self
    }

    pub fn scalar_field(&self, name: &str) -> Option<&ScalarField> {
        self.scalar_fields.iter().find(|f| f.name == name)
    }

    pub fn is_translatable(&self, name: &str) -> bool {
        self.translatable_fields.iter().any(|f| f == name)
    }

    pub fn child_schema(&self, collection: &str) -> Option<&FieldSchema> {
        self.children.get(collection)
    }

    /// True if `id` is a locally generated placeholder under this schema's convention.
    ///
    /// An empty prefix disables the convention.
    pub fn is_pending(&self, id: &str) -> bool {
        !self.pending_prefix.is_empty() && id.starts_with(&self.pending_prefix)
    }

    /// Fresh pending id: prefix followed by a UUIDv7
    pub fn new_pending_id(&self) -> String {
        format!("{}{}", self.pending_prefix, uuid::Uuid::now_v7())
    }
}
