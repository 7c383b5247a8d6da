//! Verification engine: the single orchestrating entry point.

use tracing::debug;

use crate::client::GerritClient;
use crate::discovery::{locate_server, OrgServerMap};
use crate::error::GerritKeysResult;
use crate::identity::resolve_identity;
use crate::key::{classify, KeyType, NormalizedKey};
use crate::types::{GerritConfig, KeyVerificationResult};

/// Inputs to one verification run.
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Raw key string (GPG key ID or SSH fingerprint).
    pub key: String,

    /// Explicit key type; `None` enables auto-detection.
    pub key_type: Option<KeyType>,

    /// Owner identity: email (contains `@`) or username.
    pub owner: String,

    /// Explicit Gerrit server hostname.
    pub server: Option<String>,

    /// GitHub organization for server discovery.
    pub github_org: Option<String>,

    /// Credentials and timeout; the server field is filled in by the
    /// locator.
    pub config: GerritConfig,
}

/// Result of one verification run.
#[derive(Debug, Clone)]
pub struct Verification {
    /// The classified key, as compared against the server.
    pub key: NormalizedKey,

    /// The structured verification outcome.
    pub result: KeyVerificationResult,

    /// Whether this is a synthetic test-mode result (no network contact).
    pub test_mode: bool,
}

/// Verify that a key is registered to an owner's Gerrit account.
///
/// Order is fixed: normalize the key, resolve the server, open a client
/// session, resolve the identity, then list-and-match the right key kind.
/// Each step is terminal on failure; an unresolvable owner surfaces as
/// `AccountNotFound` before any key listing happens. The client session is
/// scoped to this call and released on every exit path.
pub async fn verify(
    options: &VerifyOptions,
    map: &dyn OrgServerMap,
) -> GerritKeysResult<Verification> {
    let key = classify(&options.key, options.key_type)?;

    let server = locate_server(
        options.server.as_deref(),
        options.github_org.as_deref(),
        map,
    )?;
    debug!(server = %server, key_type = %key.key_type, "starting verification");

    let config = options.config.clone().with_server(server);
    let client = GerritClient::new(config)?;

    let account = resolve_identity(&options.owner, &client).await?;
    debug!(account_id = account.account_id, username = %account.username, "account resolved");

    let result = match key.key_type {
        KeyType::Gpg => client.verify_gpg_key_registered(&account, &key.canonical).await?,
        KeyType::Ssh => client.verify_ssh_key_registered(&account, &key.canonical).await?,
    };

    Ok(Verification {
        key,
        result,
        test_mode: false,
    })
}

/// Test-mode variant: key normalization only, no server resolution and no
/// network contact. The synthetic result is deterministic for both key
/// types: `key_registered` is always `true` and `enumerated` is `false`
/// (nothing was listed).
pub fn verify_offline(options: &VerifyOptions) -> GerritKeysResult<Verification> {
    let key = classify(&options.key, options.key_type)?;

    let result = KeyVerificationResult {
        key_registered: true,
        username: String::new(),
        enumerated: false,
        server: options.server.clone().unwrap_or_default(),
        service: "gerrit".to_string(),
        user_name: String::new(),
        user_email: String::new(),
    };

    Ok(Verification {
        key,
        result,
        test_mode: true,
    })
}
