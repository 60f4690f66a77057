//! Audit trail action names and detail redaction.

/// Known action types for audit log entries.
pub mod action_types {
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
    pub const ENTITY_CREATE: &str = "entity_create";
    pub const ENTITY_UPDATE: &str = "entity_update";
    pub const ENTITY_DELETE: &str = "entity_delete";
    pub const ENTITY_RESTORE: &str = "entity_restore";
    pub const ENTITY_PURGE: &str = "entity_purge";
    pub const ENTITY_REORDER: &str = "entity_reorder";
    pub const ENTITY_TOGGLE: &str = "entity_toggle";
    pub const CONFIG_CHANGE: &str = "config_change";
}

/// Fields whose values never reach the audit table.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "api_key",
    "authorization",
    "credential",
];

/// Replace the value of any sensitive key (at any depth) with `"[REDACTED]"`.
pub fn redact_sensitive_fields(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let redacted = map
                .iter()
                .map(|(key, val)| {
                    let lower = key.to_lowercase();
                    let val = if SENSITIVE_FIELDS.iter().any(|f| lower.contains(f)) {
                        serde_json::Value::String("[REDACTED]".to_string())
                    } else {
                        redact_sensitive_fields(val)
                    };
                    (key.clone(), val)
                })
                .collect();
            serde_json::Value::Object(redacted)
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(redact_sensitive_fields).collect())
        }
        other => other.clone(),
    }
}
