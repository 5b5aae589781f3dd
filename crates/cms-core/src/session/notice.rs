//! User-facing notifications for submit results

use std::fmt;

use super::SubmitOutcome;
use crate::errors::ExError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// What the notification layer shows after a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    /// Notice for a finished submit; `label` names the record ("Category")
    pub fn from_outcome(outcome: &SubmitOutcome, label: &str) -> Self {
        match outcome {
            SubmitOutcome::NothingToSave => Notice {
                level: NoticeLevel::Info,
                title: "No Changes".to_string(),
                description: "No changes to save".to_string(),
            },
            SubmitOutcome::Saved(_) => Notice {
                level: NoticeLevel::Success,
                title: "Success".to_string(),
                description: format!("{label} updated successfully"),
            },
        }
    }

    /// Notice for a failed submit. The server's message wins when there is one.
    pub fn from_error(err: &ExError, label: &str) -> Self {
        let description = if err.message().is_empty() {
            format!("Failed to update {label}")
        } else {
            err.message().to_string()
        };
        Notice {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            description,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
