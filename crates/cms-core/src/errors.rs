use cms_core_types::RequestId;
use thiserror::Error;

/// Result type alias using CmsError
pub type Result<T> = std::result::Result<T, CmsError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error that crosses a session or remote boundary is classified into
/// one of these kinds. Each kind maps to a stable code used by the CLI,
/// the notification layer and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Edit validation
    InvalidInput,
    UnknownField,
    UnknownCollection,
    UnknownLanguage,
    UnknownRecordKind,
    DuplicateId,

    // Records
    NotFound,
    AlreadyExists,
    InvalidRecord,

    // Remote source
    /// The server rejected the submission because the record changed underneath it
    Conflict,
    ExternalService,
    Timeout,
    Unauthorised,
    Forbidden,

    // Integration
    Io,
    Serialization,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnknownField => "ERR_UNKNOWN_FIELD",
            ExErrorKind::UnknownCollection => "ERR_UNKNOWN_COLLECTION",
            ExErrorKind::UnknownLanguage => "ERR_UNKNOWN_LANGUAGE",
            ExErrorKind::UnknownRecordKind => "ERR_UNKNOWN_RECORD_KIND",
            ExErrorKind::DuplicateId => "ERR_DUPLICATE_ID",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::InvalidRecord => "ERR_INVALID_RECORD",
            ExErrorKind::Conflict => "ERR_CONFLICT",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for failures reported by (or on the way to) the remote source.
    ///
    /// These leave the working copy intact and the user may retry.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ExErrorKind::Conflict
                | ExErrorKind::ExternalService
                | ExErrorKind::Timeout
                | ExErrorKind::Unauthorised
                | ExErrorKind::Forbidden
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification plus the context needed to explain a failed
/// fetch or submission: which operation, which record or child, the HTTP
/// status when there was one, and the request id that correlates logs.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    record_id: Option<String>,
    child_id: Option<String>,
    status: Option<u16>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            record_id: None,
            child_id: None,
            status: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add record ID context
    pub fn with_record_id(mut self, id: impl Into<String>) -> Self {
        self.record_id = Some(id.into());
        self
    }

    /// Add child ID context
    pub fn with_child_id(mut self, id: impl Into<String>) -> Self {
        self.child_id = Some(id.into());
        self
    }

    /// Add the HTTP status returned by the remote source
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn child_id(&self) -> Option<&str> {
        self.child_id.as_deref()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(record_id) = &self.record_id {
            write!(f, " (record_id: {})", record_id)?;
        }
        if let Some(child_id) = &self.child_id {
            write!(f, " (child_id: {})", child_id)?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for edit-session and record operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CmsError {
    /// Field is not part of the record type's schema
    #[error("Unknown field '{field}' for record type {record_type}")]
    UnknownField { record_type: String, field: String },

    /// Child collection is not part of the record type's schema
    #[error("Unknown collection '{collection}' for record type {record_type}")]
    UnknownCollection {
        record_type: String,
        collection: String,
    },

    /// Language code is not one of the session's known languages
    #[error("Unknown language: {language}")]
    UnknownLanguage { language: String },

    /// Record kind name could not be parsed
    #[error("Unknown record kind: {kind}")]
    UnknownRecordKind { kind: String },

    /// Child not present in the working collection
    #[error("Child {child_id} not found in collection '{collection}'")]
    ChildNotFound { collection: String, child_id: String },

    /// Child id already used within the collection
    #[error("Child {child_id} already exists in collection '{collection}'")]
    DuplicateChildId { collection: String, child_id: String },

    /// A locally added child must carry a pending placeholder id
    #[error("Child id {child_id} does not carry the pending prefix '{prefix}'")]
    NotAPendingId { child_id: String, prefix: String },

    /// Record not found in a remote source
    #[error("Record not found: {record_id}")]
    RecordNotFound { record_id: String },

    /// Record already exists in a remote source
    #[error("Record already exists: {record_id}")]
    RecordAlreadyExists { record_id: String },

    /// Record payload could not be interpreted
    #[error("Invalid record: {reason}")]
    InvalidRecord { reason: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from CmsError to ExError
///
/// Session operations report `CmsError`; the submit and remote boundaries
/// speak `ExError`.
impl From<CmsError> for ExError {
    fn from(err: CmsError) -> Self {
        let message = err.to_string();
        match err {
            CmsError::UnknownField { .. } => ExError::new(ExErrorKind::UnknownField),
            CmsError::UnknownCollection { .. } => ExError::new(ExErrorKind::UnknownCollection),
            CmsError::UnknownLanguage { .. } => ExError::new(ExErrorKind::UnknownLanguage),
            CmsError::UnknownRecordKind { .. } => ExError::new(ExErrorKind::UnknownRecordKind),
            CmsError::ChildNotFound { child_id, .. } => {
                ExError::new(ExErrorKind::NotFound).with_child_id(child_id)
            }
            CmsError::DuplicateChildId { child_id, .. } => {
                ExError::new(ExErrorKind::DuplicateId).with_child_id(child_id)
            }
            CmsError::NotAPendingId { child_id, .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_child_id(child_id)
            }
            CmsError::RecordNotFound { record_id } => {
                ExError::new(ExErrorKind::NotFound).with_record_id(record_id)
            }
            CmsError::RecordAlreadyExists { record_id } => {
                ExError::new(ExErrorKind::AlreadyExists).with_record_id(record_id)
            }
            CmsError::InvalidRecord { .. } => ExError::new(ExErrorKind::InvalidRecord),
            CmsError::Serialization { .. } => ExError::new(ExErrorKind::Serialization),
        }
        .with_message(message)
    }
}

/// Conversion from serde_json::Error to CmsError
impl From<serde_json::Error> for CmsError {
    fn from(err: serde_json::Error) -> Self {
        CmsError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from serde_json::Error to ExError
impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_kind_codes() {
        let cases = [
            (ExErrorKind::Conflict, "ERR_CONFLICT"),
            (ExErrorKind::ExternalService, "ERR_EXTERNAL_SERVICE"),
            (ExErrorKind::Timeout, "ERR_TIMEOUT"),
            (ExErrorKind::Unauthorised, "ERR_UNAUTHORISED"),
            (ExErrorKind::Forbidden, "ERR_FORBIDDEN"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
            assert!(kind.is_remote());
        }
        assert!(!ExErrorKind::UnknownField.is_remote());
    }

    #[test]
    fn test_child_not_found_converts_with_context() {
        let err: ExError = CmsError::ChildNotFound {
            collection: "services".to_string(),
            child_id: "s9".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.child_id(), Some("s9"));
        assert!(err.message().contains("services"));
    }

    #[test]
    fn test_display_includes_code_op_and_status() {
        let err = ExError::new(ExErrorKind::Conflict)
            .with_op("apply_changeset")
            .with_record_id("c1")
            .with_status(409)
            .with_message("stale record");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_CONFLICT]"));
        assert!(rendered.contains("apply_changeset"));
        assert!(rendered.contains("record_id: c1"));
        assert!(rendered.contains("status: 409"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = ExError::new(ExErrorKind::Io).with_message("connection reset");
        let outer = ExError::new(ExErrorKind::ExternalService).with_source(inner);
        let source = std::error::Error::source(&outer).expect("source should be set");
        assert!(source.to_string().contains("connection reset"));
    }
}
