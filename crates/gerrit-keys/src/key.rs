//! Key classification and normalization.
//!
//! Decides whether a raw key string is a GPG key ID or an SSH fingerprint
//! and produces the canonical form used for comparison against the key
//! lists Gerrit reports. Pure logic, no I/O.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GerritKeysError, GerritKeysResult};

/// Prefix identifying an SSH SHA-256 fingerprint.
pub const SSH_FINGERPRINT_PREFIX: &str = "SHA256:";

/// Plausible GPG key-ID lengths: short id (8), long id (16), v4 fingerprint (40).
const GPG_HEX_MIN: usize = 8;
const GPG_HEX_MAX: usize = 40;

/// Kind of key being verified. Decided once per invocation, before any
/// network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Gpg,
    Ssh,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpg => write!(f, "gpg"),
            Self::Ssh => write!(f, "ssh"),
        }
    }
}

impl FromStr for KeyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gpg" => Ok(Self::Gpg),
            "ssh" => Ok(Self::Ssh),
            other => Err(format!("unknown key type: {other} (expected gpg or ssh)")),
        }
    }
}

/// A classified key with its canonical comparison form.
///
/// - GPG: uppercase hex, no `0x` prefix, no whitespace; compared as a
///   case-insensitive suffix of the full fingerprints Gerrit reports.
/// - SSH: the `SHA256:<base64>` form; compared for exact equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedKey {
    pub key_type: KeyType,
    pub raw: String,
    pub canonical: String,
}

/// Classify a raw key string, optionally forced to an explicit type.
///
/// Auto-detection order:
/// 1. `SHA256:` prefix -> SSH
/// 2. 8-40 hex characters -> GPG
/// 3. anything else -> SSH (bare fingerprint body)
///
/// An explicit type skips detection but still normalizes; it fails with
/// `InvalidKeyFormat` when the string cannot take that type's canonical
/// form.
pub fn classify(raw: &str, explicit_type: Option<KeyType>) -> GerritKeysResult<NormalizedKey> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(GerritKeysError::InvalidKeyFormat {
            key: raw.to_string(),
            reason: "empty key".to_string(),
        });
    }

    let key_type = match explicit_type {
        Some(t) => t,
        None => detect(trimmed),
    };

    let canonical = match key_type {
        KeyType::Gpg => normalize_gpg(trimmed).ok_or_else(|| GerritKeysError::InvalidKeyFormat {
            key: raw.to_string(),
            reason: "not a hexadecimal GPG key ID".to_string(),
        })?,
        KeyType::Ssh => normalize_ssh(trimmed),
    };

    Ok(NormalizedKey {
        key_type,
        raw: raw.to_string(),
        canonical,
    })
}

fn detect(key: &str) -> KeyType {
    if key.starts_with(SSH_FINGERPRINT_PREFIX) {
        return KeyType::Ssh;
    }
    if is_hex_key_id(key) {
        return KeyType::Gpg;
    }
    // Bare fingerprint body without the SHA256: prefix.
    KeyType::Ssh
}

fn is_hex_key_id(key: &str) -> bool {
    let stripped = strip_gpg_decorations(key);
    (GPG_HEX_MIN..=GPG_HEX_MAX).contains(&stripped.len())
        && stripped.chars().all(|c| c.is_ascii_hexdigit())
}

/// Drop the optional `0x` prefix and any grouping whitespace.
fn strip_gpg_decorations(key: &str) -> String {
    let key = key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")).unwrap_or(key);
    key.chars().filter(|c| !c.is_whitespace()).collect()
}

fn normalize_gpg(key: &str) -> Option<String> {
    let stripped = strip_gpg_decorations(key);
    if stripped.is_empty() || !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(stripped.to_ascii_uppercase())
}

fn normalize_ssh(key: &str) -> String {
    if key.starts_with(SSH_FINGERPRINT_PREFIX) {
        key.to_string()
    } else {
        format!("{SSH_FINGERPRINT_PREFIX}{key}")
    }
}

/// Case-insensitive tail match of a canonical GPG key ID against a reported
/// fingerprint (Gerrit reports full fingerprints, possibly with grouping
/// spaces).
pub fn gpg_fingerprint_matches(reported: &str, canonical_key_id: &str) -> bool {
    let reported: String = reported
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    reported.ends_with(canonical_key_id)
}
