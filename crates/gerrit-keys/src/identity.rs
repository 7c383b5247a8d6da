//! Identity resolution: mapping an owner string to a Gerrit account.

use tracing::debug;

use crate::client::GerritClient;
use crate::error::{GerritKeysError, GerritKeysResult};
use crate::types::GerritAccountInfo;

/// How an owner string is interpreted for account lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKind {
    Email,
    Username,
}

impl IdentityKind {
    /// Syntactic heuristic: anything containing `@` is looked up as an
    /// email, everything else as a username. Not an RFC email validator.
    pub fn detect(owner: &str) -> Self {
        if owner.contains('@') {
            Self::Email
        } else {
            Self::Username
        }
    }
}

/// Resolve an owner string to a Gerrit account.
///
/// Calls exactly one lookup operation on the client. A lookup that comes
/// back empty is terminal: `AccountNotFound`, distinguishable from a
/// transport failure (`Service`).
pub async fn resolve_identity(
    owner: &str,
    client: &GerritClient,
) -> GerritKeysResult<GerritAccountInfo> {
    let kind = IdentityKind::detect(owner);
    debug!(owner = %owner, kind = ?kind, "resolving identity");

    let account = match kind {
        IdentityKind::Email => client.lookup_account_by_email(owner).await?,
        IdentityKind::Username => client.lookup_account_by_username(owner).await?,
    };

    account.ok_or_else(|| GerritKeysError::AccountNotFound {
        owner: owner.to_string(),
        server: client.server().to_string(),
    })
}
