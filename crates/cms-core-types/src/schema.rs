//! Canonical schema constants for structured logging
//!
//! The logging macros and the test capture layer both key off these names.

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_SESSION_ID: &str = "session_id";

// Entity identifiers
pub const FIELD_RECORD_TYPE: &str = "record_type";
pub const FIELD_RECORD_ID: &str = "record_id";
pub const FIELD_CHILD_ID: &str = "child_id";

// Changeset sizes
pub const FIELD_CHANGE_COUNT: &str = "change_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_SKIPPED: &str = "skipped";
