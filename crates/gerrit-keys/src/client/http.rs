//! HTTP layer: request building, auth prefixing, XSSI stripping, status
//! mapping.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use tracing::debug;

use crate::error::{GerritKeysError, GerritKeysResult};
use crate::types::GerritConfig;

/// Gerrit prepends this to every JSON response to defeat XSSI.
const XSSI_PREFIX: &str = ")]}'";

/// HTTP backend for making requests (holds reqwest client and config).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) config: GerritConfig,
}

impl HttpBackend {
    /// GET a Gerrit REST endpoint and return the JSON body with the XSSI
    /// prefix removed.
    ///
    /// Authenticated sessions go through the `/a` path prefix with HTTP
    /// Basic credentials, per Gerrit convention.
    pub(crate) async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> GerritKeysResult<String> {
        let url = if self.config.is_authenticated() {
            format!("{}/a{}", self.base_url, path)
        } else {
            format!("{}{}", self.base_url, path)
        };

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let (Some(username), Some(password)) = (&self.config.username, &self.config.password) {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(url = %url, status = %status, "gerrit response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| status.to_string());
            let detail = if status.as_u16() == 401 {
                "authentication failed".to_string()
            } else {
                body.chars().take(200).collect()
            };
            return Err(GerritKeysError::Service {
                message: format!("HTTP {} from {}: {}", status.as_u16(), url, detail),
            });
        }

        let body = response.text().await.map_err(|e| GerritKeysError::Service {
            message: format!("failed to read response body: {e}"),
        })?;

        Ok(strip_xssi_prefix(&body).to_string())
    }
}

/// Remove Gerrit's `)]}'` anti-XSSI prefix (and the newline after it).
pub(crate) fn strip_xssi_prefix(body: &str) -> &str {
    match body.strip_prefix(XSSI_PREFIX) {
        Some(rest) => rest.trim_start_matches(['\r', '\n']),
        None => body,
    }
}
