//! Admin API routes per record kind

use cms_core::{ExError, ExErrorKind, RecordKind};

/// HTTP method and path of one API call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub path: String,
}

impl Route {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

/// Route builder for one record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    kind: RecordKind,
}

impl Endpoints {
    pub fn new(kind: RecordKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// # Errors
    ///
    /// `ERR_INVALID_INPUT` if a non-singleton kind is fetched without an id.
    pub fn fetch(&self, id: Option<&str>) -> Result<Route, ExError> {
        match self.kind {
            RecordKind::AboutUs => Ok(Route::new(Method::Get, "/api/aboutus/admin")),
            RecordKind::Category => Ok(Route::new(
                Method::Get,
                format!("/categories/{}", self.require_id(id, "fetch_record")?),
            )),
            RecordKind::Project => Ok(Route::new(
                Method::Get,
                format!("/api/projects/{}", self.require_id(id, "fetch_record")?),
            )),
        }
    }

    /// # Errors
    ///
    /// `ERR_INVALID_INPUT` if a non-singleton kind is updated without an id.
    pub fn update(&self, id: Option<&str>) -> Result<Route, ExError> {
        match self.kind {
            RecordKind::AboutUs => Ok(Route::new(Method::Put, "/api/aboutus/content-sections")),
            RecordKind::Category => Ok(Route::new(
                Method::Put,
                format!("/categories/{}", self.require_id(id, "apply_changeset")?),
            )),
            RecordKind::Project => Ok(Route::new(
                Method::Put,
                format!("/api/projects/{}", self.require_id(id, "apply_changeset")?),
            )),
        }
    }

    /// # Errors
    ///
    /// `ERR_INVALID_INPUT` for the singleton, which is never created.
    pub fn create(&self) -> Result<Route, ExError> {
        match self.kind {
            RecordKind::AboutUs => Err(self.singleton_error("create_record")),
            RecordKind::Category => Ok(Route::new(Method::Post, "/categories/new")),
            RecordKind::Project => Ok(Route::new(Method::Post, "/api/projects/create")),
        }
    }

    /// # Errors
    ///
    /// `ERR_INVALID_INPUT` for the singleton, which is never deleted.
    pub fn delete(&self, id: &str) -> Result<Route, ExError> {
        let id = self.require_id(Some(id), "delete_record")?;
        match self.kind {
            RecordKind::AboutUs => Err(self.singleton_error("delete_record")),
            RecordKind::Category => Ok(Route::new(Method::Delete, format!("/categories/{id}"))),
            RecordKind::Project => Ok(Route::new(
                Method::Delete,
                format!("/api/projects/delete/{id}"),
            )),
        }
    }

    fn require_id<'a>(&self, id: Option<&'a str>, op: &str) -> Result<&'a str, ExError> {
        match id.map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op(op)
                .with_message(format!("{} requires a record id", self.kind.label()))),
        }
    }

    fn singleton_error(&self, op: &str) -> ExError {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op(op)
            .with_message(format!("{} is a singleton", self.kind.label()))
    }
}
