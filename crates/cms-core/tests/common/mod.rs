use cms_core::model::Record;
use cms_core::schema::presets::{default_languages, IMAGES, IS_MAIN_FIELD, MAIN_IMAGE_FIELD, SERVICES};
use cms_core::session::backfill_languages;
use cms_core::RecordKind;

/// Known languages as owned strings
#[allow(dead_code)]
pub fn languages() -> Vec<String> {
    default_languages()
}

/// Backfilled About-Us snapshot with one service
#[allow(dead_code)]
pub fn about_us() -> Record {
    let mut record = Record::new("")
        .with_field("Address", "123 Main St")
        .with_field("Phone", "+90 212 000 00 00")
        .with_field("Email", "info@example.com")
        .with_field(
            "Social Links",
            r#"{"linkedin": "https://linkedin.com/c", "instagram": "https://instagram.com/c"}"#,
        )
        .with_field("Locations", "3")
        .with_field("Our Story", "Founded in 1998.")
        .with_child(
            SERVICES,
            Record::new("s1")
                .with_translation("en", "title", "Design")
                .with_translation("en", "content", "We design buildings."),
        );
    backfill_languages(&mut record, &RecordKind::AboutUs.schema(), &languages());
    record
}

/// Backfilled category snapshot
#[allow(dead_code)]
pub fn category() -> Record {
    let mut record = Record::new("c1")
        .with_field("icon_svg_url", "/icons/steel.svg")
        .with_translation("en", "name", "Steel")
        .with_translation("en", "description", "Steel structures")
        .with_translation("fr", "name", "Acier");
    backfill_languages(&mut record, &RecordKind::Category.schema(), &languages());
    record
}

/// Backfilled project snapshot with two images, the first one main
#[allow(dead_code)]
pub fn project() -> Record {
    let mut record = Record::new("p1")
        .with_field("category_id", "c1")
        .with_field("country", "Turkey")
        .with_field("creation_date", "2024-05-01")
        .with_field(MAIN_IMAGE_FIELD, "i1")
        .with_translation("en", "title", "Bridge")
        .with_translation("en", "short_description", "A bridge")
        .with_child(
            IMAGES,
            Record::new("i1")
                .with_field("url", "/img/1.webp")
                .with_field(IS_MAIN_FIELD, true)
                .with_field("display_order", 0i64),
        )
        .with_child(
            IMAGES,
            Record::new("i2")
                .with_field("url", "/img/2.webp")
                .with_field(IS_MAIN_FIELD, false)
                .with_field("display_order", 1i64),
        );
    backfill_languages(&mut record, &RecordKind::Project.schema(), &languages());
    record
}
