//! Human-readable summary renderer for changesets.

use crate::diff::model::{Changeset, FieldChange, TranslationChange};

/// Render a Markdown summary of a [`Changeset`].
///
/// The summary is meant for review before a submission and for CLI output.
/// It is informational only and does not affect the structured changeset.
pub fn render_human_summary(changeset: &Changeset) -> String {
    let mut out = String::new();

    out.push_str("## Changeset\n\n");
    let record_id = if changeset.record_id.is_empty() {
        "(singleton)"
    } else {
        changeset.record_id.as_str()
    };
    out.push_str(&format!(
        "**Record**: {} `{}`  \n**Changes**: {}  \n**Digest**: `{}`\n\n",
        changeset.record_type,
        record_id,
        changeset.change_count(),
        short(&changeset.digest())
    ));

    if changeset.is_empty() {
        out.push_str("_No changes to save._\n");
        return out;
    }

    if !changeset.field_changes.is_empty() {
        out.push_str("### Fields\n\n");
        push_field_changes(&mut out, &changeset.field_changes, "");
        out.push('\n');
    }

    if !changeset.translation_changes.is_empty() {
        out.push_str("### Translations\n\n");
        push_translation_changes(&mut out, &changeset.translation_changes, "");
        out.push('\n');
    }

    if !changeset.child_creates.is_empty() {
        out.push_str("### Created\n\n");
        for create in &changeset.child_creates {
            let languages: Vec<&str> = create
                .child
                .translations
                .iter()
                .filter(|(_, t)| t.values().any(|v| !v.trim().is_empty()))
                .map(|(language, _)| language.as_str())
                .collect();
            out.push_str(&format!("- `{}` in {}", create.child.id, create.collection));
            if !languages.is_empty() {
                out.push_str(&format!(" ({})", languages.join(", ")));
            }
            out.push('\n');
        }
        out.push('\n');
    }

    if !changeset.child_updates.is_empty() {
        out.push_str("### Updated\n\n");
        for update in &changeset.child_updates {
            out.push_str(&format!("- `{}` in {}\n", update.child_id, update.collection));
            push_field_changes(&mut out, &update.field_changes, "  ");
            push_translation_changes(&mut out, &update.translation_changes, "  ");
        }
        out.push('\n');
    }

    if !changeset.child_deletes.is_empty() {
        out.push_str("### Deleted\n\n");
        for delete in &changeset.child_deletes {
            out.push_str(&format!("- `{}` in {}\n", delete.child_id, delete.collection));
        }
        out.push('\n');
    }

    out
}

fn push_field_changes(out: &mut String, changes: &[FieldChange], indent: &str) {
    for change in changes {
        match &change.new_value {
            Some(value) => out.push_str(&format!(
                "{indent}- **{}** → `{}`\n",
                change.field,
                value.canonical_text()
            )),
            None => out.push_str(&format!("{indent}- **{}** → _null_\n", change.field)),
        }
    }
}

fn push_translation_changes(out: &mut String, changes: &[TranslationChange], indent: &str) {
    for change in changes {
        let fields: Vec<&str> = change.changed_fields.keys().map(String::as_str).collect();
        out.push_str(&format!(
            "{indent}- **{}**: {}\n",
            change.language,
            fields.join(", ")
        ));
    }
}

/// First 12 characters of a digest for display.
fn short(digest: &str) -> &str {
    let end = digest.len().min(12);
    &digest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::engine::diff;
    use crate::model::Record;
    use crate::schema::FieldSchema;

    fn schema() -> FieldSchema {
        FieldSchema::new("about_us")
            .scalar("Address")
            .child(
                "services",
                FieldSchema::new("service")
                    .translatable("title")
                    .translatable("content"),
            )
    }

    #[test]
    fn test_summary_empty_changeset() {
        let r = Record::new("").with_field("Address", "123 Main St");
        let s = render_human_summary(&diff(&r, &r, &schema()));
        assert!(s.contains("(singleton)"));
        assert!(s.contains("_No changes to save._"));
    }

    #[test]
    fn test_summary_lists_every_section() {
        let original = Record::new("")
            .with_field("Address", "123 Main St")
            .with_child("services", Record::new("s1").with_translation("en", "title", "Design"))
            .with_child("services", Record::new("s2").with_translation("en", "title", "Paint"));
        let mut working = original.clone().with_child(
            "services",
            Record::new("pending-1").with_translation("en", "title", "Build"),
        );
        working.set_field("Address", Some("456 Oak Ave".into()));
        working
            .child_mut("services", "s1")
            .unwrap()
            .set_translation("fr", "title", "Conception");
        working.children.get_mut("services").unwrap().retain(|c| c.id != "s2");

        let s = render_human_summary(&diff(&original, &working, &schema()));
        assert!(s.contains("**Address** → `456 Oak Ave`"));
        assert!(s.contains("### Created"));
        assert!(s.contains("`pending-1` in services (en)"));
        assert!(s.contains("### Updated"));
        assert!(s.contains("  - **fr**: title"));
        assert!(s.contains("### Deleted"));
        assert!(s.contains("`s2` in services"));
    }
}
