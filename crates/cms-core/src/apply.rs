//! Functional-boundary edit reducer
//!
//! [`apply`] is the single entry point for mutating a working copy. It takes
//! ownership of the current working record, validates the command against the
//! schema, and returns either the new working record or a typed error.
//!
//! ```
//! use cms_core::{apply::apply, EditCommand, Record};
//! use cms_core::schema::{presets::default_languages, RecordKind};
//!
//! let schema = RecordKind::Category.schema();
//! let working = Record::new("c1");
//! let cmd = EditCommand::SetTranslation {
//!     language: "fr".to_string(),
//!     field: "name".to_string(),
//!     value: "Acier".to_string(),
//! };
//! let working = apply(working, cmd, &schema, &default_languages()).unwrap();
//! assert_eq!(working.translation("fr", "name"), Some("Acier"));
//! ```

use crate::commands::EditCommand;
use crate::errors::{CmsError, Result};
use crate::model::{FieldValue, Record};
use crate::schema::presets::{IMAGES, IS_MAIN_FIELD, MAIN_IMAGE_FIELD};
use crate::schema::FieldSchema;
use crate::session::backfill::backfill_languages;

/// Apply an edit command to a working copy, returning the new working copy
///
/// # Errors
///
/// Returns an error if the command names a field, collection, child or
/// language the schema does not know, or adds a child whose id collides with
/// an existing one. Validation happens before any mutation.
pub fn apply(
    mut working: Record,
    cmd: EditCommand,
    schema: &FieldSchema,
    languages: &[String],
) -> Result<Record> {
    match cmd {
        EditCommand::SetField { field, value } => {
            require_scalar(schema, &field)?;
            working.set_field(field, value);
            Ok(working)
        }

        EditCommand::SetTranslation {
            language,
            field,
            value,
        } => {
            require_translatable(schema, &field)?;
            require_language(languages, &language)?;
            working.set_translation(language, field, value);
            Ok(working)
        }

        EditCommand::AddChild { collection, child } => {
            add_child(&mut working, schema, languages, collection, child)?;
            Ok(working)
        }

        EditCommand::RemoveChild {
            collection,
            child_id,
        } => {
            remove_child(&mut working, schema, &collection, &child_id)?;
            Ok(working)
        }

        EditCommand::SetChildField {
            collection,
            child_id,
            field,
            value,
        } => {
            let child_schema = require_collection(schema, &collection)?;
            require_scalar(child_schema, &field)?;
            require_child(&mut working, &collection, &child_id)?.set_field(field, value);
            Ok(working)
        }

        EditCommand::SetChildTranslation {
            collection,
            child_id,
            language,
            field,
            value,
        } => {
            let child_schema = require_collection(schema, &collection)?;
            require_translatable(child_schema, &field)?;
            require_language(languages, &language)?;
            require_child(&mut working, &collection, &child_id)?
                .set_translation(language, field, value);
            Ok(working)
        }

        EditCommand::SetMainImage { child_id } => {
            require_scalar(schema, MAIN_IMAGE_FIELD)?;
            require_collection(schema, IMAGES)?;
            require_child(&mut working, IMAGES, &child_id)?;
            set_main_image(&mut working, Some(child_id));
            Ok(working)
        }
    }
}

fn add_child(
    working: &mut Record,
    schema: &FieldSchema,
    languages: &[String],
    collection: String,
    mut child: Record,
) -> Result<()> {
    let child_schema = require_collection(schema, &collection)?;

    if child.id.is_empty() {
        child.id = schema.new_pending_id();
    } else if !schema.is_pending(&child.id) {
        return Err(CmsError::NotAPendingId {
            child_id: child.id,
            prefix: schema.pending_prefix.clone(),
        });
    }
    if working.child(&collection, &child.id).is_some() {
        return Err(CmsError::DuplicateChildId {
            collection,
            child_id: child.id,
        });
    }

    backfill_languages(&mut child, child_schema, languages);
    let child_id = child.id.clone();
    let has_content = child.has_content(child_schema);
    working.children.entry(collection.clone()).or_default().push(child);

    // The first populated image of a project becomes its main image
    if has_content && collection == IMAGES && schema.scalar_field(MAIN_IMAGE_FIELD).is_some() {
        let has_main = working
            .field(MAIN_IMAGE_FIELD)
            .is_some_and(|v| !v.is_blank());
        if !has_main {
            set_main_image(working, Some(child_id));
        }
    }
    Ok(())
}

fn remove_child(
    working: &mut Record,
    schema: &FieldSchema,
    collection: &str,
    child_id: &str,
) -> Result<()> {
    require_collection(schema, collection)?;
    require_child(working, collection, child_id)?;
    if let Some(children) = working.children.get_mut(collection) {
        children.retain(|c| c.id != child_id);
    }

    // Removing the main image promotes the first remaining one
    if collection == IMAGES && schema.scalar_field(MAIN_IMAGE_FIELD).is_some() {
        let was_main = working
            .field(MAIN_IMAGE_FIELD)
            .and_then(FieldValue::as_text)
            == Some(child_id);
        if was_main {
            let next = working.collection(IMAGES).first().map(|c| c.id.clone());
            set_main_image(working, next);
        }
    }
    Ok(())
}

/// Point the main-image field at `child_id` and keep every image's flag in step
fn set_main_image(working: &mut Record, child_id: Option<String>) {
    if let Some(images) = working.children.get_mut(IMAGES) {
        for image in images {
            let is_main = child_id.as_deref() == Some(image.id.as_str());
            image.set_field(IS_MAIN_FIELD, Some(FieldValue::Bool(is_main)));
        }
    }
    working.set_field(MAIN_IMAGE_FIELD, child_id.map(FieldValue::Text));
}

fn require_scalar(schema: &FieldSchema, field: &str) -> Result<()> {
    match schema.scalar_field(field) {
        Some(_) => Ok(()),
        None => Err(CmsError::UnknownField {
            record_type: schema.record_type.clone(),
            field: field.to_string(),
        }),
    }
}

fn require_translatable(schema: &FieldSchema, field: &str) -> Result<()> {
    if schema.is_translatable(field) {
        Ok(())
    } else {
        Err(CmsError::UnknownField {
            record_type: schema.record_type.clone(),
            field: field.to_string(),
        })
    }
}

fn require_language(languages: &[String], language: &str) -> Result<()> {
    if languages.iter().any(|l| l == language) {
        Ok(())
    } else {
        Err(CmsError::UnknownLanguage {
            language: language.to_string(),
        })
    }
}

fn require_collection<'a>(schema: &'a FieldSchema, collection: &str) -> Result<&'a FieldSchema> {
    schema
        .child_schema(collection)
        .ok_or_else(|| CmsError::UnknownCollection {
            record_type: schema.record_type.clone(),
            collection: collection.to_string(),
        })
}

fn require_child<'a>(
    working: &'a mut Record,
    collection: &str,
    child_id: &str,
) -> Result<&'a mut Record> {
    working
        .child_mut(collection, child_id)
        .ok_or_else(|| CmsError::ChildNotFound {
            collection: collection.to_string(),
            child_id: child_id.to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::schema::presets::{default_languages, RecordKind, SERVICES};

    fn project() -> Record {
        Record::new("p1")
            .with_field(MAIN_IMAGE_FIELD, "i1")
            .with_child(
                IMAGES,
                Record::new("i1")
                    .with_field("url", "/a.png")
                    .with_field(IS_MAIN_FIELD, true),
            )
            .with_child(
                IMAGES,
                Record::new("i2")
                    .with_field("url", "/b.png")
                    .with_field(IS_MAIN_FIELD, false),
            )
    }

    #[test]
    fn test_apply_set_field() {
        let schema = RecordKind::Category.schema();
        let cmd = EditCommand::SetField {
            field: "icon_svg_url".to_string(),
            value: Some("/icons/steel.svg".into()),
        };
        let working = apply(Record::new("c1"), cmd, &schema, &default_languages()).unwrap();
        assert_eq!(
            working.field("icon_svg_url"),
            Some(&FieldValue::from("/icons/steel.svg"))
        );
    }

    #[test]
    fn test_apply_rejects_unknown_field() {
        let schema = RecordKind::Category.schema();
        let cmd = EditCommand::SetField {
            field: "colour".to_string(),
            value: None,
        };
        let err = apply(Record::new("c1"), cmd, &schema, &default_languages()).unwrap_err();
        assert!(matches!(err, CmsError::UnknownField { field, .. } if field == "colour"));
    }

    #[test]
    fn test_apply_rejects_unknown_language() {
        let schema = RecordKind::Category.schema();
        let cmd = EditCommand::SetTranslation {
            language: "de".to_string(),
            field: "name".to_string(),
            value: "Stahl".to_string(),
        };
        let err = apply(Record::new("c1"), cmd, &schema, &default_languages()).unwrap_err();
        assert_eq!(
            err,
            CmsError::UnknownLanguage {
                language: "de".to_string()
            }
        );
    }

    #[test]
    fn test_add_child_assigns_pending_id_and_backfills() {
        let schema = RecordKind::AboutUs.schema();
        let cmd = EditCommand::AddChild {
            collection: SERVICES.to_string(),
            child: Record::default().with_translation("en", "title", "Build"),
        };
        let working = apply(Record::new(""), cmd, &schema, &default_languages()).unwrap();

        let child = &working.collection(SERVICES)[0];
        assert!(schema.is_pending(&child.id));
        assert_eq!(child.translation("en", "title"), Some("Build"));
        assert_eq!(child.translation("tr", "content"), Some(""));
    }

    #[test]
    fn test_add_child_rejects_server_style_id() {
        let schema = RecordKind::AboutUs.schema();
        let cmd = EditCommand::AddChild {
            collection: SERVICES.to_string(),
            child: Record::new("s9"),
        };
        let err = apply(Record::new(""), cmd, &schema, &default_languages()).unwrap_err();
        assert!(matches!(err, CmsError::NotAPendingId { .. }));
    }

    #[test]
    fn test_add_child_rejects_duplicate_pending_id() {
        let schema = RecordKind::AboutUs.schema();
        let working = Record::new("").with_child(SERVICES, Record::new("pending-1"));
        let cmd = EditCommand::AddChild {
            collection: SERVICES.to_string(),
            child: Record::new("pending-1"),
        };
        let err = apply(working, cmd, &schema, &default_languages()).unwrap_err();
        assert!(matches!(err, CmsError::DuplicateChildId { .. }));
    }

    #[test]
    fn test_remove_unknown_child_fails() {
        let schema = RecordKind::Project.schema();
        let cmd = EditCommand::RemoveChild {
            collection: IMAGES.to_string(),
            child_id: "i9".to_string(),
        };
        let err = apply(project(), cmd, &schema, &default_languages()).unwrap_err();
        assert!(matches!(err, CmsError::ChildNotFound { .. }));
    }

    #[test]
    fn test_removing_main_image_promotes_first_remaining() {
        let schema = RecordKind::Project.schema();
        let cmd = EditCommand::RemoveChild {
            collection: IMAGES.to_string(),
            child_id: "i1".to_string(),
        };
        let working = apply(project(), cmd, &schema, &default_languages()).unwrap();

        assert_eq!(working.field(MAIN_IMAGE_FIELD), Some(&FieldValue::from("i2")));
        assert_eq!(
            working.child(IMAGES, "i2").unwrap().field(IS_MAIN_FIELD),
            Some(&FieldValue::Bool(true))
        );
    }

    #[test]
    fn test_removing_last_image_clears_main() {
        let schema = RecordKind::Project.schema();
        let langs = default_languages();
        let mut working = project();
        for id in ["i1", "i2"] {
            let cmd = EditCommand::RemoveChild {
                collection: IMAGES.to_string(),
                child_id: id.to_string(),
            };
            working = apply(working, cmd, &schema, &langs).unwrap();
        }
        assert_eq!(working.field(MAIN_IMAGE_FIELD), None);
        assert!(working.collection(IMAGES).is_empty());
    }

    #[test]
    fn test_set_main_image_flips_flags() {
        let schema = RecordKind::Project.schema();
        let cmd = EditCommand::SetMainImage {
            child_id: "i2".to_string(),
        };
        let working = apply(project(), cmd, &schema, &default_languages()).unwrap();

        assert_eq!(working.field(MAIN_IMAGE_FIELD), Some(&FieldValue::from("i2")));
        assert_eq!(
            working.child(IMAGES, "i1").unwrap().field(IS_MAIN_FIELD),
            Some(&FieldValue::Bool(false))
        );
    }

    #[test]
    fn test_set_main_image_requires_project_schema() {
        let schema = RecordKind::Category.schema();
        let cmd = EditCommand::SetMainImage {
            child_id: "i1".to_string(),
        };
        let err = apply(Record::new("c1"), cmd, &schema, &default_languages()).unwrap_err();
        assert!(matches!(err, CmsError::UnknownField { .. }));
    }

    #[test]
    fn test_first_added_image_becomes_main() {
        let schema = RecordKind::Project.schema();
        let cmd = EditCommand::AddChild {
            collection: IMAGES.to_string(),
            child: Record::default().with_field("url", "/new.png"),
        };
        let working = apply(Record::new("p2"), cmd, &schema, &default_languages()).unwrap();

        let image = &working.collection(IMAGES)[0];
        assert_eq!(
            working.field(MAIN_IMAGE_FIELD),
            Some(&FieldValue::Text(image.id.clone()))
        );
        assert_eq!(image.field(IS_MAIN_FIELD), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_blank_image_placeholder_does_not_become_main() {
        let schema = RecordKind::Project.schema();
        let cmd = EditCommand::AddChild {
            collection: IMAGES.to_string(),
            child: Record::default(),
        };
        let working = apply(Record::new("p2"), cmd, &schema, &default_languages()).unwrap();

        assert_eq!(working.field(MAIN_IMAGE_FIELD), None);
        assert_eq!(working.collection(IMAGES)[0].field(IS_MAIN_FIELD), None);
    }
}
