//! Gerrit key verification engine.
//!
//! Answers one question: is a cryptographic key (GPG key ID or SSH
//! fingerprint) claimed by a tag signer actually registered to that
//! person's account on a Gerrit server? This crate provides:
//!
//! - Key classification and normalization (GPG key ID vs. SSH fingerprint)
//! - Identity resolution (email vs. username account lookup)
//! - Server discovery from a GitHub organization mapping
//! - A Gerrit REST client for account and key-list queries
//! - The orchestrating verification engine, plus an offline test mode
//!
//! # Quick Start
//!
//! ```no_run
//! use gerrit_keys::{verify, ConventionOrgMap, VerifyOptions};
//!
//! # async fn example() -> Result<(), gerrit_keys::GerritKeysError> {
//! let options = VerifyOptions {
//!     key: "FCE8AAABF53080F6".to_string(),
//!     owner: "jdoe@example.com".to_string(),
//!     server: Some("gerrit.onap.org".to_string()),
//!     ..Default::default()
//! };
//!
//! let verification = verify(&options, &ConventionOrgMap).await?;
//! if verification.result.key_registered {
//!     println!("key is registered to {}", verification.result.username);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `GERRIT_USERNAME` | HTTP Basic username for authenticated endpoints |
//! | `GERRIT_PASSWORD` | HTTP Basic password |
//! | `GERRIT_HTTP_TIMEOUT` | Request timeout in seconds (default: 30) |
//!
//! The engine performs no retries: a transport failure surfaces
//! immediately as [`GerritKeysError::Service`], leaving retry policy to
//! the caller.

pub mod client;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod identity;
pub mod key;
pub mod types;

// Re-export main types
pub use client::GerritClient;
pub use discovery::{locate_server, ConventionOrgMap, OrgServerMap};
pub use engine::{verify, verify_offline, Verification, VerifyOptions};
pub use error::{GerritKeysError, GerritKeysResult};
pub use identity::{resolve_identity, IdentityKind};
pub use key::{classify, gpg_fingerprint_matches, KeyType, NormalizedKey};
pub use types::{
    GerritAccountInfo, GerritConfig, GpgKeyInfo, KeyVerificationResult, SshKeyInfo,
};
