//! Output rendering: human text and JSON.
//!
//! Shared formatting rules so the gerrit command (and any future service
//! commands) present results consistently.

use gerrit_keys::{GerritKeysError, Verification};
use serde_json::json;

/// Human-readable rendering of a verification outcome.
pub fn render_text(verification: &Verification) -> String {
    let result = &verification.result;
    let mut lines = Vec::new();

    if verification.test_mode {
        lines.push(format!(
            "Test mode: {} key {} normalized OK (Gerrit not contacted)",
            key_type_label(verification),
            verification.key.canonical
        ));
    } else if result.key_registered {
        lines.push(format!(
            "{} key {} is REGISTERED on Gerrit",
            key_type_label(verification),
            verification.key.canonical
        ));
    } else {
        lines.push(format!(
            "{} key {} is NOT REGISTERED on Gerrit",
            key_type_label(verification),
            verification.key.canonical
        ));
    }

    lines.extend(format_user_details(
        &result.username,
        &result.user_email,
        &result.user_name,
    ));

    // For Gerrit the server is always shown when known.
    if !result.server.is_empty() {
        lines.push(format!("Gerrit Server: {}", result.server));
    }

    lines.join("\n")
}

/// Machine-readable rendering. `success` reflects the overall outcome the
/// exit code is derived from.
pub fn render_json(verification: &Verification) -> serde_json::Value {
    let result = &verification.result;
    json!({
        "success": result.key_registered,
        "is_registered": result.key_registered,
        "key_type": verification.key.key_type.to_string(),
        "key": verification.key.canonical,
        "username": result.username,
        "user_name": result.user_name,
        "user_email": result.user_email,
        "server": result.server,
        "service": result.service,
        "enumerated": result.enumerated,
        "test_mode": verification.test_mode,
    })
}

pub fn render_error_json(err: &GerritKeysError) -> serde_json::Value {
    json!({
        "success": false,
        "error": err.to_string(),
    })
}

fn key_type_label(verification: &Verification) -> String {
    verification.key.key_type.to_string().to_uppercase()
}

/// User details as bullet points; empty fields are skipped.
fn format_user_details(username: &str, email: &str, name: &str) -> Vec<String> {
    let mut lines = Vec::new();
    if !username.is_empty() {
        lines.push(format!("  \u{2022} Username: {username}"));
    }
    if !email.is_empty() {
        lines.push(format!("  \u{2022} Email: {email}"));
    }
    if !name.is_empty() {
        lines.push(format!("  \u{2022} Name: {name}"));
    }
    lines
}
