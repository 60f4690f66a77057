//! URL slug generation and validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum slug length in characters.
pub const MAX_SLUG_LENGTH: usize = 120;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Derive a slug from free text: lowercase ASCII alphanumerics separated by
/// single hyphens. Non-ASCII characters are dropped.
///
/// ```
/// use vitrine_core::slug::slugify;
///
/// assert_eq!(slugify("Brand Identity & Logo Design"), "brand-identity-logo-design");
/// assert_eq!(slugify("  --Web  Apps--  "), "web-apps");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    slug
}

/// Check that `slug` is non-empty, short enough and in canonical form.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}': use lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

/// Use the supplied slug if present, otherwise derive one from `title`.
/// The result is always validated.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, CoreError> {
    let slug = match explicit {
        Some(s) => s.trim().to_string(),
        None => slugify(title),
    };
    validate_slug(&slug)?;
    Ok(slug)
}
