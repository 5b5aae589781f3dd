//! Operation boundary macros
//!
//! A remote-facing operation logs one `start` event and then one `end` or
//! `end_error` event. Passing `ctx = <&RequestContext>` right after the op
//! name stamps `request_id` and `session_id` on the event, so the boundary
//! events of one submission can be joined with the remote's own logs.

/// Log the start of an operation
///
/// ```
/// # use cms_core::log_op_start;
/// # use cms_core_types::RequestContext;
/// let ctx = RequestContext::new();
/// log_op_start!("submit_changeset", ctx = &ctx, record_type = "category");
/// log_op_start!("rebuild_index");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr, ctx = $ctx:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = cms_core_types::schema::EVENT_START,
            request_id = %$ctx.request_id,
            session_id = $ctx.session_str(),
            $($($field)*)?
        )
    };
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = cms_core_types::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use cms_core::log_op_end;
/// # use cms_core_types::RequestContext;
/// let ctx = RequestContext::new();
/// log_op_end!("submit_changeset", ctx = &ctx, duration_ms = 12);
/// log_op_end!("rebuild_index", duration_ms = 3, entries = 40);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, ctx = $ctx:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = cms_core_types::schema::EVENT_END,
            duration_ms = $duration,
            request_id = %$ctx.request_id,
            session_id = $ctx.session_str(),
            $($($field)*)?
        )
    };
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = cms_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log an operation error
///
/// The error may be anything convertible into
/// [`ExError`](crate::errors::ExError); its code, kind and HTTP status
/// (0 when there is none) are recorded.
///
/// ```
/// # use cms_core::{log_op_error, errors::CmsError};
/// # use cms_core_types::RequestContext;
/// let ctx = RequestContext::new();
/// let err = CmsError::RecordNotFound { record_id: "c1".to_string() };
/// log_op_error!("fetch_record", err, ctx = &ctx, duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, ctx = $ctx:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = cms_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            request_id = %$ctx.request_id,
            session_id = $ctx.session_str(),
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            http_status = ex_err.status().unwrap_or(0),
            $($($field)*)?
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = cms_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            http_status = ex_err.status().unwrap_or(0),
            $($($field)*)?
        );
    }};
}
