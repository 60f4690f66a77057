//! The content tables that share ordering, publishing and soft-delete.
//!
//! Table names are only ever interpolated into SQL from this closed set,
//! never from request input.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTable {
    Services,
    Packages,
    GalleryItems,
    Projects,
    Reviews,
    Stats,
    Faqs,
    AboutContents,
}

impl ContentTable {
    pub const ALL: [ContentTable; 8] = [
        ContentTable::Services,
        ContentTable::Packages,
        ContentTable::GalleryItems,
        ContentTable::Projects,
        ContentTable::Reviews,
        ContentTable::Stats,
        ContentTable::Faqs,
        ContentTable::AboutContents,
    ];

    /// SQL table name. Also used as the audit `entity_type`.
    pub fn table(self) -> &'static str {
        match self {
            ContentTable::Services => "services",
            ContentTable::Packages => "packages",
            ContentTable::GalleryItems => "gallery_items",
            ContentTable::Projects => "projects",
            ContentTable::Reviews => "reviews",
            ContentTable::Stats => "stats",
            ContentTable::Faqs => "faqs",
            ContentTable::AboutContents => "about_contents",
        }
    }

    /// Human-readable singular name used in error messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            ContentTable::Services => "Service",
            ContentTable::Packages => "Package",
            ContentTable::GalleryItems => "GalleryItem",
            ContentTable::Projects => "Project",
            ContentTable::Reviews => "Review",
            ContentTable::Stats => "Stat",
            ContentTable::Faqs => "Faq",
            ContentTable::AboutContents => "AboutContent",
        }
    }

    /// SQL expression producing a short label for trash listings.
    pub(crate) fn label_expr(self) -> &'static str {
        match self {
            ContentTable::Services | ContentTable::GalleryItems | ContentTable::Projects => {
                "title"
            }
            ContentTable::Packages => "name",
            ContentTable::Reviews => "author_name",
            ContentTable::Stats => "label",
            ContentTable::Faqs => "question",
            ContentTable::AboutContents => "COALESCE(title, section_type)",
        }
    }

    /// Look up a table by its SQL name (as used in trash URLs).
    pub fn from_table_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.table() == name)
    }
}
