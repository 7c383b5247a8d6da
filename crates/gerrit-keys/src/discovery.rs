//! Server discovery: explicit hostname or GitHub-org derived.

use tracing::debug;

use crate::error::{GerritKeysError, GerritKeysResult};

/// Organization -> Gerrit server mapping collaborator.
///
/// Injected into [`locate_server`] so callers (and tests) can supply their
/// own mapping source.
pub trait OrgServerMap {
    /// Resolve a GitHub organization to a Gerrit hostname, or `None` when
    /// the organization is unknown.
    fn gerrit_host(&self, org: &str) -> Option<String>;
}

/// Default mapping: Linux Foundation projects host Gerrit at
/// `gerrit.{org}.org` (e.g. `onap` -> `gerrit.onap.org`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionOrgMap;

impl OrgServerMap for ConventionOrgMap {
    fn gerrit_host(&self, org: &str) -> Option<String> {
        if !is_dns_label(org) {
            return None;
        }
        Some(format!("gerrit.{}.org", org.to_ascii_lowercase()))
    }
}

fn is_dns_label(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 63
        && !s.starts_with('-')
        && !s.ends_with('-')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Decide the Gerrit server hostname, exactly once per invocation.
///
/// The caller is expected to pass exactly one of `explicit_server` or
/// `github_org`; anything else is `AmbiguousServerConfig`. Discovery via
/// the mapping collaborator fails with `ServerDiscoveryFailed` when the
/// organization cannot be resolved.
pub fn locate_server(
    explicit_server: Option<&str>,
    github_org: Option<&str>,
    map: &dyn OrgServerMap,
) -> GerritKeysResult<String> {
    match (explicit_server, github_org) {
        (Some(server), None) => {
            let server = server.trim();
            if server.is_empty() {
                return Err(GerritKeysError::AmbiguousServerConfig {
                    message: "server is empty".to_string(),
                });
            }
            Ok(server.to_string())
        }
        (None, Some(org)) => {
            let host = map
                .gerrit_host(org)
                .ok_or_else(|| GerritKeysError::ServerDiscoveryFailed {
                    org: org.to_string(),
                })?;
            debug!(org = %org, host = %host, "discovered Gerrit server from GitHub org");
            Ok(host)
        }
        (Some(_), Some(_)) => Err(GerritKeysError::AmbiguousServerConfig {
            message: "both server and github-org were provided".to_string(),
        }),
        (None, None) => Err(GerritKeysError::AmbiguousServerConfig {
            message: "neither server nor github-org was provided".to_string(),
        }),
    }
}
