//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000002_create_auth_tables.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// Returns `true` if the role may manage site content (everything except
/// users, settings, trash purging and the audit trail).
pub fn can_edit_content(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_editor_can_edit() {
        assert!(can_edit_content(ROLE_ADMIN));
        assert!(can_edit_content(ROLE_EDITOR));
    }

    #[test]
    fn unknown_role_cannot_edit() {
        assert!(!can_edit_content("viewer"));
        assert!(!can_edit_content(""));
    }
}
