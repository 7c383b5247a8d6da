//! `tag-validate gerrit` - Verify a key against a Gerrit account.

use gerrit_keys::{
    verify, verify_offline, ConventionOrgMap, GerritConfig, GerritKeysError, KeyType,
    Verification, VerifyOptions,
};
use tracing::debug;

use crate::cli::args::GerritArgs;
use crate::cli::render;
use crate::exit_codes;

pub async fn run(args: GerritArgs) -> anyhow::Result<i32> {
    if args.server.is_none() && args.github_org.is_none() {
        return Ok(usage_error(
            "Either --server or --github-org must be provided",
            args.json,
        ));
    }

    let key_type = match args.key_type.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<KeyType>() {
            Ok(t) => Some(t),
            Err(reason) => return Ok(usage_error(&reason, args.json)),
        },
    };

    // clap already resolved GERRIT_USERNAME/GERRIT_PASSWORD; from_env picks
    // up the timeout.
    let mut config = GerritConfig::from_env("");
    if let (Some(username), Some(password)) = (&args.gerrit_username, &args.gerrit_password) {
        config = config.with_credentials(username, password);
    }

    let options = VerifyOptions {
        key: args.key.clone(),
        key_type,
        owner: args.owner.clone(),
        server: args.server.clone(),
        github_org: args.github_org.clone(),
        config,
    };

    let outcome = if args.test_mode {
        debug!("test mode: skipping Gerrit");
        verify_offline(&options)
    } else {
        verify(&options, &ConventionOrgMap).await
    };

    match outcome {
        Ok(verification) => Ok(report(&verification, args.json)),
        Err(e) => Ok(report_error(&e, args.json)),
    }
}

fn report(verification: &Verification, json: bool) -> i32 {
    if json {
        println!("{}", render::render_json(verification));
    } else {
        println!("{}", render::render_text(verification));
    }

    if verification.result.key_registered {
        exit_codes::SUCCESS
    } else {
        exit_codes::NOT_REGISTERED
    }
}

fn report_error(err: &GerritKeysError, json: bool) -> i32 {
    if json {
        println!("{}", render::render_error_json(err));
    } else {
        println!("Error: {err}");
    }

    match err {
        e if e.is_usage_error() => exit_codes::USAGE_ERROR,
        GerritKeysError::AccountNotFound { .. } => exit_codes::ACCOUNT_NOT_FOUND,
        _ => exit_codes::SERVICE_ERROR,
    }
}

fn usage_error(message: &str, json: bool) -> i32 {
    if json {
        println!("{}", serde_json::json!({"success": false, "error": message}));
    } else {
        println!("Error: {message}");
    }
    exit_codes::USAGE_ERROR
}
