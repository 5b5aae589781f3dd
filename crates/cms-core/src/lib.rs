//! CMS Core - snapshot diffing for the multilingual admin panel
//!
//! This crate provides the edit-side kernel of the admin panel:
//! - Record model with scalar fields, per-language translations and child collections
//! - Static field schemas per record type (About Us, Category, Project)
//! - The snapshot-diff engine producing minimal changesets
//! - Edit sessions: immutable snapshot, working copy, command reducer, submit
//! - The remote-source contract and an in-memory implementation
//!
//! The HTTP remote lives in `cms-remote`; the command-line front end in `cms-cli`.

pub mod apply;
pub mod commands;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod remote;
pub mod schema;
pub mod session;

// Re-export commonly used types
pub use apply::apply;
pub use commands::EditCommand;
pub use diff::{apply_changeset, diff, render_human_summary, Changeset};
pub use errors::{CmsError, ExError, ExErrorKind, Result};
pub use model::{FieldValue, Record};
pub use remote::{InMemoryRemote, RemoteSource};
pub use schema::{FieldSchema, RecordKind};
pub use session::{EditSession, Notice, SubmitOutcome};
