//! Core types shared across the admin CMS crates
//!
//! This crate provides the small vocabulary used by both the error facility
//! and the logging facility:
//!
//! - **Correlation types**: RequestId, SessionId, RequestContext
//! - **Sensitive data**: Sensitive<T> marker for session tokens and passwords
//! - **Schema constants**: Canonical log field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId, SessionId};
pub use sensitive::Sensitive;
