//! Gerrit account client: account lookup and key listing.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::{GerritKeysError, GerritKeysResult};
use crate::key::gpg_fingerprint_matches;
use crate::types::{
    GerritAccountInfo, GerritConfig, GpgKeyInfo, KeyVerificationResult, SshKeyInfo,
};

mod http;

use http::HttpBackend;

const USER_AGENT_VALUE: &str = concat!("gerrit-keys/", env!("CARGO_PKG_VERSION"));

/// Session-scoped Gerrit client.
///
/// Owns its transport connection pool; dropping the client releases it on
/// every exit path, which is the resource discipline the engine relies on.
#[derive(Debug, Clone)]
pub struct GerritClient {
    http: HttpBackend,
}

impl GerritClient {
    pub fn new(config: GerritConfig) -> GerritKeysResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| GerritKeysError::Service {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        let base_url = config.base_url();

        Ok(Self {
            http: HttpBackend {
                client,
                base_url,
                config,
            },
        })
    }

    /// Look up an account by email. `Ok(None)` means no account matched;
    /// errors are reserved for transport/protocol failure.
    pub async fn lookup_account_by_email(
        &self,
        email: &str,
    ) -> GerritKeysResult<Option<GerritAccountInfo>> {
        self.query_account(&format!("email:{email}")).await
    }

    /// Look up an account by username. Same contract as the email lookup.
    pub async fn lookup_account_by_username(
        &self,
        username: &str,
    ) -> GerritKeysResult<Option<GerritAccountInfo>> {
        self.query_account(&format!("username:{username}")).await
    }

    async fn query_account(&self, query: &str) -> GerritKeysResult<Option<GerritAccountInfo>> {
        debug!(query = %query, "querying accounts");

        let body = self
            .http
            .get_json(
                "/accounts/",
                &[("q", query.to_string()), ("o", "DETAILS".to_string())],
            )
            .await?;

        let accounts: Vec<GerritAccountInfo> =
            serde_json::from_str(&body).map_err(|e| GerritKeysError::Service {
                message: format!("failed to parse account query response: {e}"),
            })?;

        Ok(accounts.into_iter().next())
    }

    /// Check whether any GPG fingerprint registered to the account ends
    /// with the canonical key ID (case-insensitive tail match).
    ///
    /// Gerrit has no single-key existence endpoint, so this always lists
    /// the account's keys: `enumerated` is `true` regardless of outcome.
    pub async fn verify_gpg_key_registered(
        &self,
        account: &GerritAccountInfo,
        canonical_key_id: &str,
    ) -> GerritKeysResult<KeyVerificationResult> {
        let keys = self.list_gpg_keys(account.account_id).await?;

        let key_registered = keys.iter().any(|(key_id, info)| {
            // Prefer the full fingerprint; the map key is itself a key ID.
            if info.fingerprint.is_empty() {
                gpg_fingerprint_matches(key_id, canonical_key_id)
            } else {
                gpg_fingerprint_matches(&info.fingerprint, canonical_key_id)
            }
        });

        Ok(self.result_for(account, key_registered))
    }

    /// Check whether the account has an SSH key with exactly the canonical
    /// `SHA256:<base64>` fingerprint. Always a list scan, like the GPG
    /// path.
    pub async fn verify_ssh_key_registered(
        &self,
        account: &GerritAccountInfo,
        canonical_fingerprint: &str,
    ) -> GerritKeysResult<KeyVerificationResult> {
        let keys = self.list_ssh_keys(account.account_id).await?;

        let key_registered = keys
            .iter()
            .filter_map(|key| key.fingerprint.as_deref())
            .any(|fingerprint| fingerprint == canonical_fingerprint);

        Ok(self.result_for(account, key_registered))
    }

    async fn list_gpg_keys(
        &self,
        account_id: u64,
    ) -> GerritKeysResult<HashMap<String, GpgKeyInfo>> {
        let path = format!("/accounts/{account_id}/gpgkeys");
        debug!(path = %path, "listing GPG keys");

        let body = self.http.get_json(&path, &[]).await?;
        serde_json::from_str(&body).map_err(|e| GerritKeysError::Service {
            message: format!("failed to parse GPG key list: {e}"),
        })
    }

    async fn list_ssh_keys(&self, account_id: u64) -> GerritKeysResult<Vec<SshKeyInfo>> {
        let path = format!("/accounts/{account_id}/sshkeys");
        debug!(path = %path, "listing SSH keys");

        let body = self.http.get_json(&path, &[]).await?;
        serde_json::from_str(&body).map_err(|e| GerritKeysError::Service {
            message: format!("failed to parse SSH key list: {e}"),
        })
    }

    fn result_for(&self, account: &GerritAccountInfo, key_registered: bool) -> KeyVerificationResult {
        KeyVerificationResult {
            key_registered,
            username: account.username.clone(),
            enumerated: true,
            server: self.http.config.server.clone(),
            service: "gerrit".to_string(),
            user_name: account.name.clone(),
            user_email: account.email.clone(),
        }
    }

    /// Server this session is bound to (as configured, not the base URL).
    pub fn server(&self) -> &str {
        &self.http.config.server
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.http.config.is_authenticated()
    }
}
