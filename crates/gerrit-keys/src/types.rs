//! Configuration and wire types for the Gerrit REST protocol.

use serde::{Deserialize, Serialize};

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GerritConfig {
    /// Gerrit server: bare hostname (`gerrit.onap.org`) or full base URL.
    pub server: String,

    /// HTTP Basic username for authenticated endpoints.
    #[serde(default)]
    pub username: Option<String>,

    /// HTTP Basic password (or HTTP API token).
    #[serde(default)]
    pub password: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for GerritConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            username: None,
            password: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl GerritConfig {
    /// Create config for a server, credentials from environment.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `GERRIT_USERNAME` | HTTP Basic username |
    /// | `GERRIT_PASSWORD` | HTTP Basic password |
    /// | `GERRIT_HTTP_TIMEOUT` | Request timeout in seconds (default: 30) |
    pub fn from_env(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            username: std::env::var("GERRIT_USERNAME").ok().filter(|v| !v.is_empty()),
            password: std::env::var("GERRIT_PASSWORD").ok().filter(|v| !v.is_empty()),
            timeout_secs: std::env::var("GERRIT_HTTP_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        }
    }

    /// Set the server.
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Set HTTP Basic credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Base URL for REST calls.
    ///
    /// A bare hostname gets `https://`; a value that already carries a
    /// scheme (mock servers in tests) is used as-is.
    pub fn base_url(&self) -> String {
        let server = self.server.trim_end_matches('/');
        if server.contains("://") {
            server.to_string()
        } else {
            format!("https://{server}")
        }
    }

    /// Whether Basic credentials are configured.
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

/// Gerrit account record, as returned by the accounts query endpoint.
///
/// Obtained once per verification and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GerritAccountInfo {
    /// Numeric account ID.
    #[serde(rename = "_account_id")]
    pub account_id: u64,

    /// Account username.
    #[serde(default)]
    pub username: String,

    /// Preferred email address.
    #[serde(default)]
    pub email: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Account status string.
    #[serde(default)]
    pub status: String,
}

/// One entry of the GPG key map returned by `/accounts/{id}/gpgkeys`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpgKeyInfo {
    /// Full key fingerprint, as rendered by Gerrit (may contain grouping
    /// spaces).
    #[serde(default)]
    pub fingerprint: String,

    /// User IDs bound to the key.
    #[serde(default)]
    pub user_ids: Vec<String>,

    /// Key status (e.g., "TRUSTED").
    #[serde(default)]
    pub status: Option<String>,
}

/// One entry of the SSH key list returned by `/accounts/{id}/sshkeys`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshKeyInfo {
    /// Sequence number of the key.
    #[serde(default)]
    pub seq: u32,

    /// `SHA256:<base64>` fingerprint. Older Gerrit versions omit it.
    #[serde(default)]
    pub fingerprint: Option<String>,

    /// Full public key line.
    #[serde(default)]
    pub ssh_public_key: String,

    /// Key comment.
    #[serde(default)]
    pub comment: Option<String>,

    /// Whether the key is valid.
    #[serde(default)]
    pub valid: bool,
}

/// Outcome of one key verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyVerificationResult {
    /// Whether the key is bound to the account.
    pub key_registered: bool,

    /// Username of the resolved account.
    pub username: String,

    /// True when the match was found by scanning the account's full key
    /// list rather than a direct single-key lookup. Gerrit has no direct
    /// existence endpoint, so live verifications always set this.
    pub enumerated: bool,

    /// Server the verification ran against.
    pub server: String,

    /// Always `"gerrit"` for this engine.
    pub service: String,

    /// Display name of the resolved account.
    pub user_name: String,

    /// Email of the resolved account.
    pub user_email: String,
}
