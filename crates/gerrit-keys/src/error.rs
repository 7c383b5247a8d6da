//! Error types for the key verification engine.

/// Key verification errors.
#[derive(Debug, thiserror::Error)]
pub enum GerritKeysError {
    /// Key string cannot be normalized under the requested or detected type.
    #[error("invalid key format: {key} - {reason}")]
    InvalidKeyFormat { key: String, reason: String },

    /// Neither or both of explicit server and GitHub org resolved to a host.
    #[error("ambiguous server configuration: {message}")]
    AmbiguousServerConfig { message: String },

    /// The org -> Gerrit server mapping could not resolve the organization.
    #[error("server discovery failed for GitHub org: {org}")]
    ServerDiscoveryFailed { org: String },

    /// Identity resolution contacted the service but found no account.
    #[error("no Gerrit account found for {owner} on {server}")]
    AccountNotFound { owner: String, server: String },

    /// Transport, authentication, or malformed-response failure.
    #[error("Gerrit service error: {message}")]
    Service { message: String },
}

impl GerritKeysError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Usage / configuration issues
            Self::InvalidKeyFormat { .. } => 2,
            Self::AmbiguousServerConfig { .. } => 2,
            Self::ServerDiscoveryFailed { .. } => 2,

            // Lookup succeeded, no such account
            Self::AccountNotFound { .. } => 3,

            // Transport / protocol
            Self::Service { .. } => 4,
        }
    }

    /// Whether the error is a local input/configuration problem that never
    /// reached the network.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidKeyFormat { .. }
                | Self::AmbiguousServerConfig { .. }
                | Self::ServerDiscoveryFailed { .. }
        )
    }
}

impl From<reqwest::Error> for GerritKeysError {
    fn from(err: reqwest::Error) -> Self {
        Self::Service {
            message: err.to_string(),
        }
    }
}

/// Result type for key verification operations.
pub type GerritKeysResult<T> = Result<T, GerritKeysError>;
