//! Snapshot-diff engine.
//!
//! Compares the immutable snapshot of a record with its edited working copy
//! and produces the minimal [`Changeset`] that brings the remote record in
//! line with the working copy.
//!
//! ## Entry point
//!
//! ```
//! use cms_core::diff::{diff, render_human_summary};
//! use cms_core::model::Record;
//! use cms_core::schema::RecordKind;
//!
//! let schema = RecordKind::Category.schema();
//! let original = Record::new("c1").with_translation("en", "name", "Steel");
//! let working = original.clone().with_translation("fr", "name", "Acier");
//!
//! let changeset = diff(&original, &working, &schema);
//! assert_eq!(changeset.translation_changes.len(), 1);
//! println!("{}", render_human_summary(&changeset));
//! ```
//!
//! ## Guarantees
//!
//! - **No-op**: diffing a record against itself yields an empty changeset.
//! - **Determinism**: identical inputs produce byte-identical changesets.
//! - **Disjointness**: a child id appears in at most one of creates, updates
//!   and deletes.
//! - **Tolerance**: the engine never fails. Missing sections are treated as
//!   absent values.

pub mod apply;
pub mod engine;
pub mod human_summary;
pub mod model;

pub use apply::{apply_changeset, IdSource, SequentialIds};
pub use engine::diff;
pub use human_summary::render_human_summary;
pub use model::{Changeset, ChildCreate, ChildDelete, ChildUpdate, FieldChange, TranslationChange};
