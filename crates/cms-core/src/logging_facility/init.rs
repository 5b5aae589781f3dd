//! Logging initialization

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Registry only; tests install their own capture layer
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "cms=debug,cms_core=debug,cms_remote=debug,cms_cli=debug",
            Profile::Production => "cms_core=info,cms_remote=info,cms_cli=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup. Later calls are ignored, and so is a call made
/// after some other global subscriber was installed.
///
/// ```
/// use cms_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        if installed.is_err() {
            tracing::debug!("global subscriber already installed; keeping it");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_profiles_have_distinct_filters() {
        assert_ne!(
            Profile::Development.default_filter(),
            Profile::Production.default_filter()
        );
        assert_eq!(Profile::Test.default_filter(), "off");
    }
}
