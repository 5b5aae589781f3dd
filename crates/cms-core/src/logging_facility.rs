//! Structured logging facility
//!
//! - Single initialization point via `init(profile)`
//! - Operation boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! ```rust
//! use cms_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Only the session and remote boundaries log. The diff engine itself stays
//! silent apart from tolerance warnings (duplicate child ids, unparseable
//! composite values).

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
