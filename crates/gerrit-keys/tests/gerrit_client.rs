//! Integration tests for the Gerrit client and verification engine against
//! a mock Gerrit server.

use gerrit_keys::{
    verify, ConventionOrgMap, GerritClient, GerritConfig, GerritKeysError, KeyType, VerifyOptions,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GPG_KEY_ID: &str = "FCE8AAABF53080F6";
const SSH_FINGERPRINT: &str = "SHA256:nThbg6kXUpJWGl7E1IGOCspRomTxdCARLviKw6E5SY8";

/// Gerrit responses carry the `)]}'` anti-XSSI prefix; the client must
/// strip it before parsing.
fn gerrit_json(value: &serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(")]}}'\n{value}"))
        .insert_header("content-type", "application/json")
}

fn account_body() -> serde_json::Value {
    serde_json::json!([{
        "_account_id": 1000001,
        "username": "jdoe",
        "email": "jdoe@example.com",
        "name": "John Doe",
        "status": "ACTIVE"
    }])
}

fn create_test_client(mock_server: &MockServer) -> GerritClient {
    let config = GerritConfig::default().with_server(mock_server.uri());
    GerritClient::new(config).expect("failed to create client")
}

#[tokio::test]
async fn test_lookup_account_by_email() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/"))
        .and(query_param("q", "email:jdoe@example.com"))
        .and(query_param("o", "DETAILS"))
        .respond_with(gerrit_json(&account_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let account = client
        .lookup_account_by_email("jdoe@example.com")
        .await
        .expect("lookup failed")
        .expect("expected an account");

    assert_eq!(account.account_id, 1000001);
    assert_eq!(account.username, "jdoe");
    assert_eq!(account.name, "John Doe");
}

#[tokio::test]
async fn test_lookup_account_by_username() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/"))
        .and(query_param("q", "username:jdoe"))
        .respond_with(gerrit_json(&account_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let account = client
        .lookup_account_by_username("jdoe")
        .await
        .expect("lookup failed");

    assert!(account.is_some());
}

#[tokio::test]
async fn test_lookup_account_empty_result_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/"))
        .respond_with(gerrit_json(&serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let account = client
        .lookup_account_by_email("nobody@example.com")
        .await
        .expect("empty result must not be an error");

    assert!(account.is_none());
}

#[tokio::test]
async fn test_lookup_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.lookup_account_by_email("jdoe@example.com").await;

    match result {
        Err(GerritKeysError::Service { message }) => {
            assert!(message.contains("500"), "message: {message}");
        }
        other => panic!("expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_verify_gpg_key_registered_tail_match() {
    let mock_server = MockServer::start().await;

    // Gerrit renders fingerprints with grouping spaces.
    let gpg_keys = serde_json::json!({
        "AFC8A49C": {
            "fingerprint": "0192 723A E31D 2C1A B2C3  D4E5 FCE8 AAAB F530 80F6",
            "user_ids": ["John Doe <jdoe@example.com>"],
            "status": "TRUSTED"
        }
    });

    Mock::given(method("GET"))
        .and(path("/accounts/1000001/gpgkeys"))
        .respond_with(gerrit_json(&gpg_keys))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let account = serde_json::from_value(account_body()[0].clone()).unwrap();
    let result = client
        .verify_gpg_key_registered(&account, GPG_KEY_ID)
        .await
        .expect("verify failed");

    assert!(result.key_registered);
    assert!(result.enumerated);
    assert_eq!(result.username, "jdoe");
    assert_eq!(result.service, "gerrit");
    assert_eq!(result.user_name, "John Doe");
    assert_eq!(result.user_email, "jdoe@example.com");
}

#[tokio::test]
async fn test_verify_gpg_key_not_registered() {
    let mock_server = MockServer::start().await;

    let gpg_keys = serde_json::json!({
        "DEADBEEF": {
            "fingerprint": "1111 2222 3333 4444 5555  6666 7777 8888 9999 0000"
        }
    });

    Mock::given(method("GET"))
        .and(path("/accounts/1000001/gpgkeys"))
        .respond_with(gerrit_json(&gpg_keys))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let account = serde_json::from_value(account_body()[0].clone()).unwrap();
    let result = client
        .verify_gpg_key_registered(&account, GPG_KEY_ID)
        .await
        .expect("verify failed");

    // A clean list scan with no match is a negative result, not an error.
    assert!(!result.key_registered);
    assert!(result.enumerated);
    assert_eq!(result.username, "jdoe");
}

#[tokio::test]
async fn test_verify_ssh_key_exact_match() {
    let mock_server = MockServer::start().await;

    let ssh_keys = serde_json::json!([
        {
            "seq": 1,
            "ssh_public_key": "ssh-rsa AAAA... old@host",
            "valid": true
        },
        {
            "seq": 2,
            "fingerprint": SSH_FINGERPRINT,
            "ssh_public_key": "ssh-ed25519 AAAA... jdoe@host",
            "valid": true
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/accounts/1000001/sshkeys"))
        .respond_with(gerrit_json(&ssh_keys))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let account = serde_json::from_value(account_body()[0].clone()).unwrap();
    let result = client
        .verify_ssh_key_registered(&account, SSH_FINGERPRINT)
        .await
        .expect("verify failed");

    // Entry without a fingerprint is skipped, the exact match counts.
    assert!(result.key_registered);
    assert!(result.enumerated);
}

#[tokio::test]
async fn test_verify_ssh_key_no_match() {
    let mock_server = MockServer::start().await;

    let ssh_keys = serde_json::json!([
        {"seq": 1, "fingerprint": "SHA256:somethingelse", "ssh_public_key": "", "valid": true}
    ]);

    Mock::given(method("GET"))
        .and(path("/accounts/1000001/sshkeys"))
        .respond_with(gerrit_json(&ssh_keys))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let account = serde_json::from_value(account_body()[0].clone()).unwrap();
    let result = client
        .verify_ssh_key_registered(&account, SSH_FINGERPRINT)
        .await
        .expect("verify failed");

    assert!(!result.key_registered);
}

#[tokio::test]
async fn test_authenticated_requests_use_a_prefix_and_basic_auth() {
    let mock_server = MockServer::start().await;

    // "admin:secret"
    Mock::given(method("GET"))
        .and(path("/a/accounts/"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(gerrit_json(&account_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = GerritConfig::default()
        .with_server(mock_server.uri())
        .with_credentials("admin", "secret");
    let client = GerritClient::new(config).expect("failed to create client");

    assert!(client.is_authenticated());
    let account = client
        .lookup_account_by_email("jdoe@example.com")
        .await
        .expect("lookup failed");
    assert!(account.is_some());
}

#[tokio::test]
async fn test_engine_end_to_end_gpg_registered() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/"))
        .and(query_param("q", "email:jdoe@example.com"))
        .respond_with(gerrit_json(&account_body()))
        .mount(&mock_server)
        .await;

    let gpg_keys = serde_json::json!({
        "F53080F6": {"fingerprint": "0192 723A E31D 2C1A B2C3  D4E5 FCE8 AAAB F530 80F6"}
    });
    Mock::given(method("GET"))
        .and(path("/accounts/1000001/gpgkeys"))
        .respond_with(gerrit_json(&gpg_keys))
        .mount(&mock_server)
        .await;

    let options = VerifyOptions {
        key: GPG_KEY_ID.to_string(),
        owner: "jdoe@example.com".to_string(),
        server: Some(mock_server.uri()),
        ..Default::default()
    };

    let verification = verify(&options, &ConventionOrgMap)
        .await
        .expect("verify failed");

    assert!(!verification.test_mode);
    assert_eq!(verification.key.key_type, KeyType::Gpg);
    assert!(verification.result.key_registered);
    assert!(verification.result.enumerated);
    assert_eq!(verification.result.username, "jdoe");
    assert_eq!(verification.result.service, "gerrit");
    assert_eq!(verification.result.server, mock_server.uri());
}

#[tokio::test]
async fn test_engine_account_not_found_short_circuits() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/"))
        .respond_with(gerrit_json(&serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // No key listing may happen after a failed account lookup.
    Mock::given(method("GET"))
        .and(path("/accounts/1000001/gpgkeys"))
        .respond_with(gerrit_json(&serde_json::json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let options = VerifyOptions {
        key: GPG_KEY_ID.to_string(),
        owner: "jdoe@example.com".to_string(),
        server: Some(mock_server.uri()),
        ..Default::default()
    };

    let err = verify(&options, &ConventionOrgMap).await.unwrap_err();
    match err {
        GerritKeysError::AccountNotFound { ref owner, .. } => {
            assert_eq!(owner, "jdoe@example.com");
        }
        other => panic!("expected AccountNotFound, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_engine_username_owner_uses_username_lookup() {
    let mock_server = MockServer::start().await;

    // An email query for a username-shaped owner would be a bug.
    Mock::given(method("GET"))
        .and(path("/accounts/"))
        .and(query_param("q", "email:jdoe"))
        .respond_with(gerrit_json(&serde_json::json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/accounts/"))
        .and(query_param("q", "username:jdoe"))
        .respond_with(gerrit_json(&account_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ssh_keys = serde_json::json!([
        {"seq": 1, "fingerprint": SSH_FINGERPRINT, "ssh_public_key": "", "valid": true}
    ]);
    Mock::given(method("GET"))
        .and(path("/accounts/1000001/sshkeys"))
        .respond_with(gerrit_json(&ssh_keys))
        .mount(&mock_server)
        .await;

    let options = VerifyOptions {
        key: SSH_FINGERPRINT.to_string(),
        key_type: Some(KeyType::Ssh),
        owner: "jdoe".to_string(),
        server: Some(mock_server.uri()),
        ..Default::default()
    };

    let verification = verify(&options, &ConventionOrgMap)
        .await
        .expect("verify failed");
    assert!(verification.result.key_registered);
}

#[tokio::test]
async fn test_engine_service_error_propagates_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/"))
        .respond_with(gerrit_json(&account_body()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/accounts/1000001/gpgkeys"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let options = VerifyOptions {
        key: GPG_KEY_ID.to_string(),
        owner: "jdoe@example.com".to_string(),
        server: Some(mock_server.uri()),
        ..Default::default()
    };

    let err = verify(&options, &ConventionOrgMap).await.unwrap_err();
    match err {
        GerritKeysError::Service { message } => {
            assert!(message.contains("503"), "message: {message}");
            assert!(message.contains("maintenance"), "message: {message}");
        }
        other => panic!("expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_engine_malformed_payload_is_service_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(")]}'\nnot json"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.lookup_account_by_email("jdoe@example.com").await;

    assert!(matches!(result, Err(GerritKeysError::Service { .. })));
}

#[tokio::test]
async fn test_engine_invalid_key_never_touches_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(gerrit_json(&account_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let options = VerifyOptions {
        key: "not a key".to_string(),
        key_type: Some(KeyType::Gpg),
        owner: "jdoe@example.com".to_string(),
        server: Some(mock_server.uri()),
        ..Default::default()
    };

    let err = verify(&options, &ConventionOrgMap).await.unwrap_err();
    assert!(matches!(err, GerritKeysError::InvalidKeyFormat { .. }));
}

#[tokio::test]
async fn test_engine_server_config_validated_before_network() {
    let options = VerifyOptions {
        key: GPG_KEY_ID.to_string(),
        owner: "jdoe@example.com".to_string(),
        ..Default::default()
    };

    let err = verify(&options, &ConventionOrgMap).await.unwrap_err();
    assert!(matches!(err, GerritKeysError::AmbiguousServerConfig { .. }));
    assert!(err.is_usage_error());
}
