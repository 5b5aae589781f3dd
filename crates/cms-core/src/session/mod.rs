//! Edit sessions: an immutable snapshot plus a working copy
//!
//! A session is created from one fetch of the remote record. The snapshot is
//! backfilled with every known language and then never touched again; all
//! edits go through [`EditSession::apply`] on the working copy. Submitting
//! diffs the two and sends the changeset, unless it is empty.
//!
//! A successful submit does not move the snapshot forward. Callers either end
//! the session or [`reload`](EditSession::reload) it.

pub mod backfill;
pub mod notice;

use std::time::Instant;

use cms_core_types::{RequestContext, SessionId};

use crate::apply::apply;
use crate::commands::EditCommand;
use crate::diff::{diff, Changeset};
use crate::errors::{ExError, Result};
use crate::model::Record;
use crate::remote::RemoteSource;
use crate::schema::FieldSchema;
use crate::{log_op_end, log_op_error, log_op_start};

pub use backfill::backfill_languages;
pub use notice::{Notice, NoticeLevel};

/// Result of a submit that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The changeset was empty; the remote was not called
    NothingToSave,
    /// The remote accepted the changeset and returned the updated record
    Saved(Record),
}

/// One user editing one record
#[derive(Debug, Clone)]
pub struct EditSession {
    id: SessionId,
    schema: FieldSchema,
    languages: Vec<String>,
    /// Id the record was fetched under; `None` for a singleton
    fetch_id: Option<String>,
    original: Record,
    working: Record,
}

impl EditSession {
    /// Start a session from an already fetched snapshot
    pub fn start(snapshot: Record, schema: FieldSchema, languages: Vec<String>) -> Self {
        let fetch_id = (!snapshot.id.is_empty()).then(|| snapshot.id.clone());
        Self::from_snapshot(SessionId::new(), snapshot, schema, languages, fetch_id)
    }

    /// Fetch the record from `remote` and start a session on it
    ///
    /// # Errors
    ///
    /// Returns the remote error if the fetch fails.
    pub fn open(
        remote: &mut dyn RemoteSource,
        id: Option<&str>,
        schema: FieldSchema,
        languages: Vec<String>,
    ) -> std::result::Result<Self, ExError> {
        let session_id = SessionId::new();
        let snapshot = fetch(remote, id, &session_id, &schema)?;
        Ok(Self::from_snapshot(
            session_id,
            snapshot,
            schema,
            languages,
            id.map(str::to_string),
        ))
    }

    fn from_snapshot(
        id: SessionId,
        mut snapshot: Record,
        schema: FieldSchema,
        languages: Vec<String>,
        fetch_id: Option<String>,
    ) -> Self {
        backfill_languages(&mut snapshot, &schema, &languages);
        let working = snapshot.clone();
        Self {
            id,
            schema,
            languages,
            fetch_id,
            original: snapshot,
            working,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// The immutable snapshot
    pub fn original(&self) -> &Record {
        &self.original
    }

    pub fn working(&self) -> &Record {
        &self.working
    }

    /// Apply one edit to the working copy
    ///
    /// # Errors
    ///
    /// Returns a validation error; the working copy is then unchanged.
    pub fn apply(&mut self, cmd: EditCommand) -> Result<()> {
        self.working = apply(self.working.clone(), cmd, &self.schema, &self.languages)?;
        Ok(())
    }

    /// Replace the whole working copy, e.g. with an edited export
    ///
    /// The new copy is backfilled like the snapshot, so omitted languages
    /// compare as empty rather than as removed.
    pub fn replace_working(&mut self, mut working: Record) {
        backfill_languages(&mut working, &self.schema, &self.languages);
        self.working = working;
    }

    /// Add a child and return its pending id
    ///
    /// # Errors
    ///
    /// Same as [`EditCommand::AddChild`].
    pub fn add_child(&mut self, collection: &str, mut child: Record) -> Result<String> {
        if child.id.is_empty() {
            child.id = self.schema.new_pending_id();
        }
        let child_id = child.id.clone();
        self.apply(EditCommand::AddChild {
            collection: collection.to_string(),
            child,
        })?;
        Ok(child_id)
    }

    /// Changes between the snapshot and the working copy
    pub fn changeset(&self) -> Changeset {
        diff(&self.original, &self.working, &self.schema)
    }

    pub fn is_dirty(&self) -> bool {
        !self.changeset().is_empty()
    }

    /// Send the changeset to `remote`
    ///
    /// An empty changeset returns [`SubmitOutcome::NothingToSave`] without a
    /// remote call.
    ///
    /// # Errors
    ///
    /// Returns the remote rejection. The working copy is preserved so the
    /// user can retry.
    pub fn submit(
        &self,
        remote: &mut dyn RemoteSource,
    ) -> std::result::Result<SubmitOutcome, ExError> {
        let changeset = self.changeset();
        let ctx = RequestContext::for_session(&self.id);

        if changeset.is_empty() {
            tracing::info!(
                component = module_path!(),
                op = "submit_changeset",
                event = cms_core_types::schema::EVENT_SKIPPED,
                session_id = %self.id,
                record_type = %self.schema.record_type
            );
            return Ok(SubmitOutcome::NothingToSave);
        }

        let start = Instant::now();
        log_op_start!(
            "submit_changeset",
            ctx = &ctx,
            record_type = %self.schema.record_type,
            record_id = %changeset.record_id,
            change_count = changeset.change_count()
        );

        match remote.apply_changeset(self.fetch_id.as_deref(), &changeset, &ctx) {
            Ok(record) => {
                log_op_end!(
                    "submit_changeset",
                    ctx = &ctx,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Ok(SubmitOutcome::Saved(record))
            }
            Err(err) => {
                let err = if err.op().is_none() {
                    err.with_op("submit_changeset")
                } else {
                    err
                };
                log_op_error!(
                    "submit_changeset",
                    err.clone(),
                    ctx = &ctx,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    /// Re-fetch the record and restart with a fresh snapshot
    ///
    /// Local edits are discarded.
    ///
    /// # Errors
    ///
    /// Returns the remote error; the session is then unchanged.
    pub fn reload(&mut self, remote: &mut dyn RemoteSource) -> std::result::Result<(), ExError> {
        let snapshot = fetch(remote, self.fetch_id.as_deref(), &self.id, &self.schema)?;
        *self = Self::from_snapshot(
            self.id.clone(),
            snapshot,
            self.schema.clone(),
            std::mem::take(&mut self.languages),
            self.fetch_id.clone(),
        );
        Ok(())
    }
}

fn fetch(
    remote: &mut dyn RemoteSource,
    id: Option<&str>,
    session_id: &SessionId,
    schema: &FieldSchema,
) -> std::result::Result<Record, ExError> {
    let ctx = RequestContext::for_session(session_id);
    let start = Instant::now();
    log_op_start!(
        "fetch_record",
        ctx = &ctx,
        record_type = %schema.record_type,
        record_id = id.unwrap_or("")
    );
    match remote.fetch_record(id, &ctx) {
        Ok(record) => {
            log_op_end!(
                "fetch_record",
                ctx = &ctx,
                duration_ms = start.elapsed().as_millis() as u64
            );
            Ok(record)
        }
        Err(err) => {
            log_op_error!(
                "fetch_record",
                err.clone(),
                ctx = &ctx,
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::remote::InMemoryRemote;
    use crate::schema::presets::{default_languages, RecordKind};

    #[test]
    fn test_start_backfills_snapshot_and_working() {
        let session = EditSession::start(
            Record::new("c1").with_translation("en", "name", "Steel"),
            RecordKind::Category.schema(),
            default_languages(),
        );
        assert_eq!(session.original().translation("tr", "description"), Some(""));
        assert_eq!(session.original(), session.working());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_failed_apply_leaves_working_copy() {
        let mut session = EditSession::start(
            Record::new("c1"),
            RecordKind::Category.schema(),
            default_languages(),
        );
        let before = session.working().clone();
        let err = session.apply(EditCommand::SetField {
            field: "nope".to_string(),
            value: None,
        });
        assert!(err.is_err());
        assert_eq!(session.working(), &before);
    }

    #[test]
    fn test_replace_working_backfills_missing_languages() {
        let mut session = EditSession::start(
            Record::new("c1").with_translation("en", "name", "Steel"),
            RecordKind::Category.schema(),
            default_languages(),
        );
        session.replace_working(
            Record::new("c1")
                .with_translation("en", "name", "Steel")
                .with_translation("fr", "name", "Acier"),
        );

        assert_eq!(session.working().translation("tr", "name"), Some(""));
        let changeset = session.changeset();
        assert_eq!(changeset.translation_changes.len(), 1);
        assert_eq!(changeset.translation_changes[0].language, "fr");
    }

    #[test]
    fn test_reload_discards_edits() {
        let mut remote =
            InMemoryRemote::new().with_record(Record::new("c1").with_field("icon_svg_url", "/a.svg"));
        let mut session = EditSession::open(
            &mut remote,
            Some("c1"),
            RecordKind::Category.schema(),
            default_languages(),
        )
        .unwrap();
        session
            .apply(EditCommand::SetField {
                field: "icon_svg_url".to_string(),
                value: Some("/b.svg".into()),
            })
            .unwrap();
        assert!(session.is_dirty());

        session.reload(&mut remote).unwrap();
        assert!(!session.is_dirty());
        assert_eq!(remote.calls().fetch, 2);
    }
}
