//! Schemas for the record types the admin panel edits

use std::fmt;
use std::str::FromStr;

use super::FieldSchema;
use crate::errors::CmsError;

/// Languages the admin panel edits
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "fr", "tr"];

pub const SERVICES: &str = "services";
pub const IMAGES: &str = "images";
pub const MAIN_IMAGE_FIELD: &str = "main_image_id";
pub const IS_MAIN_FIELD: &str = "is_main";

/// The record types of the admin panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Singleton company document: contact info, statistics, story, services
    AboutUs,
    /// Sector taxonomy entry
    Category,
    /// Portfolio project with an image gallery
    Project,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::AboutUs, RecordKind::Category, RecordKind::Project];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::AboutUs => "about-us",
            RecordKind::Category => "category",
            RecordKind::Project => "project",
        }
    }

    /// Human label used in notifications
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::AboutUs => "About Us information",
            RecordKind::Category => "Category",
            RecordKind::Project => "Project",
        }
    }

    /// Singletons are fetched without an id
    pub fn is_singleton(&self) -> bool {
        matches!(self, RecordKind::AboutUs)
    }

    pub fn schema(&self) -> FieldSchema {
        match self {
            RecordKind::AboutUs => FieldSchema::new("about_us")
                .scalar("Address")
                .scalar("Phone")
                .scalar("Email")
                .keyed_url_set("Social Links")
                .scalar("Years of Experience")
                .scalar("Completed Projects")
                .scalar("Professional Team")
                .scalar("Locations")
                .scalar("Our Story")
                .child(
                    SERVICES,
                    FieldSchema::new("service")
                        .translatable("title")
                        .translatable("content"),
                ),
            RecordKind::Category => FieldSchema::new("category")
                .scalar("icon_svg_url")
                .translatable("name")
                .translatable("description"),
            RecordKind::Project => FieldSchema::new("project")
                .scalar("category_id")
                .scalar("country")
                .scalar("creation_date")
                .scalar(MAIN_IMAGE_FIELD)
                .translatable("title")
                .translatable("short_description")
                .translatable("extra_description")
                .child(
                    IMAGES,
                    FieldSchema::new("project_image")
                        .scalar("url")
                        .derived_scalar(IS_MAIN_FIELD)
                        .derived_scalar("display_order"),
                ),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = CmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "about-us" | "aboutus" | "about" => Ok(RecordKind::AboutUs),
            "category" | "categories" => Ok(RecordKind::Category),
            "project" | "projects" => Ok(RecordKind::Project),
            _ => Err(CmsError::UnknownRecordKind {
                kind: s.to_string(),
            }),
        }
    }
}

/// Owned copy of [`DEFAULT_LANGUAGES`]
pub fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
}
