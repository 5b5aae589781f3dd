//! Property-based tests for snapshot-diff invariants.
//!
//! Records are generated against the Project schema: scalar fields, three
//! languages and an image collection mixing persisted and pending ids.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeSet;

use proptest::prelude::*;

use cms_core::diff::{apply_changeset, diff, SequentialIds};
use cms_core::model::Record;
use cms_core::schema::presets::IMAGES;
use cms_core::RecordKind;

/// Short text that is sometimes blank
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        "[a-z]{1,8}",
    ]
}

/// Persisted or pending image id drawn from a small pool so collisions happen
fn arb_image_id() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["i1", "i2", "i3", "i4", "pending-a", "pending-b"])
        .prop_map(String::from)
}

fn arb_image() -> impl Strategy<Value = Record> {
    (arb_image_id(), arb_text(), 0i64..5).prop_map(|(id, url, order)| {
        Record::new(id)
            .with_field("url", url)
            .with_field("display_order", order)
    })
}

fn arb_project() -> impl Strategy<Value = Record> {
    (
        arb_text(),
        arb_text(),
        prop::collection::btree_map(
            prop::sample::select(vec!["en", "fr", "tr"]),
            (arb_text(), arb_text()),
            0..3,
        ),
        prop::collection::vec(arb_image(), 0..5),
    )
        .prop_map(|(country, date, translations, images)| {
            let mut record = Record::new("p1")
                .with_field("country", country)
                .with_field("creation_date", date);
            for (lang, (title, short)) in translations {
                record = record
                    .with_translation(lang, "title", title)
                    .with_translation(lang, "short_description", short);
            }
            // Collections never hold duplicate ids at rest
            let mut seen = BTreeSet::new();
            for image in images {
                if seen.insert(image.id.clone()) {
                    record = record.with_child(IMAGES, image);
                }
            }
            record
        })
}

proptest! {
    #[test]
    fn prop_identical_records_diff_to_empty(record in arb_project()) {
        let changeset = diff(&record, &record.clone(), &RecordKind::Project.schema());
        prop_assert!(changeset.is_empty());
    }

    #[test]
    fn prop_child_partition_is_disjoint(original in arb_project(), working in arb_project()) {
        let changeset = diff(&original, &working, &RecordKind::Project.schema());
        let creates = changeset.created_child_ids();
        let updates = changeset.updated_child_ids();
        let deletes = changeset.deleted_child_ids();

        prop_assert!(creates.is_disjoint(&updates));
        prop_assert!(creates.is_disjoint(&deletes));
        prop_assert!(updates.is_disjoint(&deletes));
    }

    #[test]
    fn prop_pending_ids_are_never_deleted(original in arb_project(), working in arb_project()) {
        let changeset = diff(&original, &working, &RecordKind::Project.schema());
        prop_assert!(changeset
            .deleted_child_ids()
            .iter()
            .all(|id| !id.starts_with("pending-")));
    }

    #[test]
    fn prop_applying_diff_converges_on_persisted_state(
        original in arb_project(),
        working in arb_project(),
    ) {
        let schema = RecordKind::Project.schema();
        let changeset = diff(&original, &working, &schema);
        let applied = apply_changeset(&original, &changeset, &mut SequentialIds::new("srv-"));

        // Scalars and translations now agree with the working copy
        let rest = diff(&applied, &working, &schema);
        prop_assert!(rest.field_changes.is_empty());
        prop_assert!(rest.translation_changes.is_empty());

        // Every surviving persisted image agrees too
        for image in working.collection(IMAGES) {
            if schema.is_pending(&image.id) {
                continue;
            }
            if let Some(saved) = applied.child(IMAGES, &image.id) {
                prop_assert_eq!(saved.field("url").map(|v| v.canonical_text()).unwrap_or_default(),
                    image.field("url").map(|v| v.canonical_text()).unwrap_or_default());
            }
        }
    }
}
