//! Redacting wrapper for secrets
//!
//! The admin API authenticates with a session cookie. The token travels
//! through config structs that derive `Debug`, so it is wrapped in
//! [`Sensitive`] to keep it out of logs and error output.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Wrapper that redacts its contents in `Debug` and `Display`
///
/// ```
/// use cms_core_types::Sensitive;
///
/// let token = Sensitive::new("session=abc123".to_string());
/// assert_eq!(format!("{:?}", token), "***REDACTED***");
/// assert_eq!(token.expose(), "session=abc123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the secret. Call sites should be limited to the wire layer.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
