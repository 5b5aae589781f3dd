//! Edit commands applied to a working copy
//!
//! Every user action on an edit form maps to one command. Commands are
//! processed by [`apply`](crate::apply::apply), which takes ownership of the
//! working copy and returns a new one.

use crate::model::{FieldValue, Record};

/// One user edit on a working copy
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Set a scalar field of the record (`None` clears it)
    SetField {
        field: String,
        value: Option<FieldValue>,
    },

    /// Set one translatable field of the record in one language
    SetTranslation {
        language: String,
        field: String,
        value: String,
    },

    /// Append a child to a collection
    ///
    /// An empty `child.id` is replaced by a fresh pending id. A non-empty id
    /// must carry the pending prefix.
    AddChild { collection: String, child: Record },

    /// Remove a child from a collection
    RemoveChild {
        collection: String,
        child_id: String,
    },

    /// Set a scalar field of a child
    SetChildField {
        collection: String,
        child_id: String,
        field: String,
        value: Option<FieldValue>,
    },

    /// Set one translatable field of a child in one language
    SetChildTranslation {
        collection: String,
        child_id: String,
        language: String,
        field: String,
        value: String,
    },

    /// Make an image the project's main image
    SetMainImage { child_id: String },
}

impl EditCommand {
    /// Stable operation name used in logs
    pub fn op_name(&self) -> &'static str {
        match self {
            EditCommand::SetField { .. } => "set_field",
            EditCommand::SetTranslation { .. } => "set_translation",
            EditCommand::AddChild { .. } => "add_child",
            EditCommand::RemoveChild { .. } => "remove_child",
            EditCommand::SetChildField { .. } => "set_child_field",
            EditCommand::SetChildTranslation { .. } => "set_child_translation",
            EditCommand::SetMainImage { .. } => "set_main_image",
        }
    }
}
