//! Remote data source contract
//!
//! The backend owns persistence. An edit session talks to it through
//! [`RemoteSource`]: one fetch to seed the snapshot, one submission of the
//! changeset, plus whole-record create and delete outside the diff flow.
//!
//! All methods return [`ExError`] so that HTTP status, request id and the
//! server's message survive up to the notification layer.

pub mod memory;

use cms_core_types::RequestContext;

use crate::diff::Changeset;
use crate::errors::ExError;
use crate::model::Record;

pub use memory::InMemoryRemote;

/// A backend that stores records of one kind
pub trait RemoteSource {
    /// Fetch the full nested record; `None` fetches the singleton.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a transport/remote error.
    fn fetch_record(&mut self, id: Option<&str>, ctx: &RequestContext) -> Result<Record, ExError>;

    /// Apply a changeset transactionally and return the updated record.
    ///
    /// A failed submission means nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns the remote rejection (validation, conflict, transport).
    fn apply_changeset(
        &mut self,
        id: Option<&str>,
        changeset: &Changeset,
        ctx: &RequestContext,
    ) -> Result<Record, ExError>;

    /// Create a whole record.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the id is taken, or a remote error.
    fn create_record(&mut self, record: &Record, ctx: &RequestContext) -> Result<Record, ExError>;

    /// Delete a whole record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a remote error.
    fn delete_record(&mut self, id: &str, ctx: &RequestContext) -> Result<(), ExError>;
}
