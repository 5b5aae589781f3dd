//! In-memory remote source for tests and offline use

use std::collections::BTreeMap;

use cms_core_types::RequestContext;

use crate::diff::{apply_changeset, Changeset, IdSource, SequentialIds};
use crate::errors::{CmsError, ExError};
use crate::model::Record;
use crate::remote::RemoteSource;

/// Key under which the singleton record is stored
const SINGLETON_KEY: &str = "";

/// Calls made against an [`InMemoryRemote`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub fetch: usize,
    pub apply: usize,
    pub create: usize,
    pub delete: usize,
}

/// A remote source backed by a map of records
///
/// Submissions are replayed with [`apply_changeset`]; created children get
/// server-style ids. A one-shot rejection can be armed to simulate a failed
/// submission.
#[derive(Debug)]
pub struct InMemoryRemote {
    records: BTreeMap<String, Record>,
    ids: SequentialIds,
    reject_next: Option<ExError>,
    calls: CallCounts,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            ids: SequentialIds::new("srv-"),
            reject_next: None,
            calls: CallCounts::default(),
        }
    }

    /// Seed a record; an empty id stores the singleton
    pub fn with_record(mut self, record: Record) -> Self {
        self.records.insert(record.id.clone(), record);
        self
    }

    /// Fail the next mutating call (apply, create or delete) with `err`
    pub fn reject_next(&mut self, err: ExError) {
        self.reject_next = Some(err);
    }

    pub fn calls(&self) -> CallCounts {
        self.calls
    }

    /// Stored record by id (`None` = singleton)
    pub fn record(&self, id: Option<&str>) -> Option<&Record> {
        self.records.get(id.unwrap_or(SINGLETON_KEY))
    }

    fn take_rejection(&mut self, ctx: &RequestContext) -> Result<(), ExError> {
        match self.reject_next.take() {
            Some(err) => Err(err.with_request_id(ctx.request_id.clone())),
            None => Ok(()),
        }
    }

    fn not_found(id: &str) -> ExError {
        CmsError::RecordNotFound {
            record_id: id.to_string(),
        }
        .into()
    }
}

impl Default for InMemoryRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteSource for InMemoryRemote {
    fn fetch_record(&mut self, id: Option<&str>, ctx: &RequestContext) -> Result<Record, ExError> {
        self.calls.fetch += 1;
        let key = id.unwrap_or(SINGLETON_KEY);
        match self.records.get(key) {
            Some(record) => Ok(record.clone()),
            // A singleton that was never saved is an empty document
            None if id.is_none() => Ok(Record::default()),
            None => Err(Self::not_found(key)
                .with_op("fetch_record")
                .with_request_id(ctx.request_id.clone())),
        }
    }

    fn apply_changeset(
        &mut self,
        id: Option<&str>,
        changeset: &Changeset,
        ctx: &RequestContext,
    ) -> Result<Record, ExError> {
        self.calls.apply += 1;
        self.take_rejection(ctx)?;

        let key = id.unwrap_or(SINGLETON_KEY).to_string();
        let current = match self.records.get(&key) {
            Some(record) => record.clone(),
            None if id.is_none() => Record::default(),
            None => {
                return Err(Self::not_found(&key)
                    .with_op("apply_changeset")
                    .with_request_id(ctx.request_id.clone()))
            }
        };

        let mut updated = apply_changeset(&current, changeset, &mut self.ids);
        if id.is_none() {
            updated.id = SINGLETON_KEY.to_string();
        }
        self.records.insert(key, updated.clone());
        Ok(updated)
    }

    fn create_record(&mut self, record: &Record, ctx: &RequestContext) -> Result<Record, ExError> {
        self.calls.create += 1;
        self.take_rejection(ctx)?;

        let mut created = record.clone();
        if created.id.is_empty() {
            created.id = self.ids.next_id("records");
        } else if self.records.contains_key(&created.id) {
            return Err(ExError::from(CmsError::RecordAlreadyExists {
                record_id: created.id.clone(),
            })
            .with_op("create_record")
            .with_request_id(ctx.request_id.clone()));
        }
        for children in created.children.values_mut() {
            for child in children {
                child.id = self.ids.next_id("children");
            }
        }
        self.records.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    fn delete_record(&mut self, id: &str, ctx: &RequestContext) -> Result<(), ExError> {
        self.calls.delete += 1;
        self.take_rejection(ctx)?;

        match self.records.remove(id) {
            Some(_) => Ok(()),
            None => Err(Self::not_found(id)
                .with_op("delete_record")
                .with_request_id(ctx.request_id.clone())),
        }
    }
}
