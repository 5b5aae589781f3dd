//! CMS Remote - HTTP access to the admin REST API
//!
//! Implements [`cms_core::remote::RemoteSource`] over a blocking `reqwest`
//! client. One [`HttpRemote`] serves one record kind; routes, status mapping
//! and connection settings live in their own modules.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod status;

pub use client::HttpRemote;
pub use config::RemoteConfig;
pub use endpoints::Endpoints;
pub use status::{kind_for_status, map_status};
