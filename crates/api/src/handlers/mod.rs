pub mod about;
pub mod audit;
pub mod auth;
pub mod contact;
pub mod faqs;
pub mod gallery;
pub mod newsletter;
pub mod packages;
pub mod projects;
pub mod public;
pub mod reviews;
pub mod seo;
pub mod services;
pub mod settings;
pub mod sortable;
pub mod stats;
pub mod trash;
pub mod users;

use vitrine_core::error::CoreError;

use crate::error::{AppError, AppResult};

/// Reject a required text field that is empty or whitespace.
pub(crate) fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{field} must not be empty"
        ))));
    }
    Ok(())
}

/// Like [`require_text`] for fields that are optional on update.
pub(crate) fn require_text_opt(field: &str, value: Option<&str>) -> AppResult<()> {
    match value {
        Some(v) => require_text(field, v),
        None => Ok(()),
    }
}
