//! Query parameter types shared across handler modules.

use serde::Deserialize;

/// `?include_inactive=true` on admin listings of publishable content.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Listing filter for content grouped by category (gallery, projects, FAQs).
#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl CategoryParams {
    /// The category filter, treating an empty `?category=` as absent.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_category_is_no_filter() {
        let params = CategoryParams {
            category: Some("  ".into()),
            include_inactive: false,
        };
        assert_eq!(params.category(), None);

        let params = CategoryParams {
            category: Some("branding".into()),
            include_inactive: false,
        };
        assert_eq!(params.category(), Some("branding"));
    }
}
