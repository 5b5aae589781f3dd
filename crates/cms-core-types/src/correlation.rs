//! Correlation types for edit sessions and remote submissions
//!
//! Every edit session gets a [`SessionId`] when it starts, and every call to
//! the remote source gets a fresh [`RequestId`]. Both are UUIDv7 strings so
//! they sort by creation time in logs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new time-ordered identifier (UUIDv7)
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Wrap an identifier received from elsewhere (header, log line)
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Identifier of a single remote call (fetch, submit, create, delete)
    RequestId
);

correlation_id!(
    /// Identifier of one edit session (one user, one open form)
    SessionId
);

/// Correlation context attached to a remote call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub session_id: Option<SessionId>,
}

impl RequestContext {
    /// Fresh context that belongs to no edit session
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            session_id: None,
        }
    }

    /// Fresh request id scoped to an edit session
    pub fn for_session(session_id: &SessionId) -> Self {
        Self {
            request_id: RequestId::new(),
            session_id: Some(session_id.clone()),
        }
    }

    /// Session id as a log field value; empty outside a session
    pub fn session_str(&self) -> &str {
        self.session_id.as_ref().map_or("", SessionId::as_str)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
