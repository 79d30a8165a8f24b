use async_trait::async_trait;
use clap::Parser;
use idh_hook::cli::Args;
use idh_hook::report::write_report;
use idh_identity_core::{
    HarmonizedIdentity, IdentityError, IdentityProvider, IdentityResult, StaticIdentityProvider,
};
use idh_identity_os::OsUserProvider;

/// Provider whose lookup always fails, for exercising the exception path.
struct BrokenProvider;

#[async_trait]
impl IdentityProvider for BrokenProvider {
    fn provider_id(&self) -> &str {
        "broken"
    }

    async fn lookup(
        &self,
        _issuer: &str,
        _subject: &str,
        _create: bool,
    ) -> IdentityResult<HarmonizedIdentity> {
        Err(IdentityError::ProviderError("backing store offline".into()))
    }
}

fn static_provider() -> StaticIdentityProvider {
    StaticIdentityProvider::new("alice", 1000, 1000, "/home/alice")
}

/// Runs the hook the way main does and returns the single stdout line.
async fn run_hook(argv: &[&str], provider: &dyn IdentityProvider) -> String {
    let full: Vec<&str> = std::iter::once("idh-hook").chain(argv.iter().copied()).collect();
    let args = Args::try_parse_from(full).expect("raw argv should always parse");

    let report = args.run(provider).await;

    let mut buffer = Vec::new();
    write_report(&mut buffer, &report).unwrap();
    String::from_utf8(buffer).unwrap()
}

async fn run_hook_json(argv: &[&str], provider: &dyn IdentityProvider) -> serde_json::Value {
    let line = run_hook(argv, provider).await;
    serde_json::from_str(line.trim_end()).expect("hook output should be one JSON object")
}

#[tokio::test]
async fn open_id_connect_reports_the_resolved_identity() {
    let value = run_hook_json(
        &["OpenIdConnect", "https://issuer.example", "sub-123"],
        &static_provider(),
    )
    .await;

    assert_eq!(value["uid"], "alice");
    assert_eq!(value["uidNumber"], 1000);
    assert_eq!(value["gidNumber"], 1000);
    assert_eq!(value["homeDirectory"], "/home/alice");
    assert_eq!(
        value["userIds"],
        serde_json::json!([["https://issuer.example", "sub-123"]])
    );
}

#[tokio::test]
async fn open_id_connect_resolves_against_the_real_os_user() {
    let value = run_hook_json(
        &["OpenIdConnect", "https://issuer.example", "sub-123"],
        &OsUserProvider::new(),
    )
    .await;

    assert_eq!(
        value["uidNumber"],
        u64::from(nix::unistd::getuid().as_raw())
    );
    assert_eq!(
        value["gidNumber"],
        u64::from(nix::unistd::getgid().as_raw())
    );
    assert!(value["uid"].as_str().is_some_and(|s| !s.is_empty()));
    assert_eq!(
        value["userIds"],
        serde_json::json!([["https://issuer.example", "sub-123"]])
    );
}

#[tokio::test]
async fn no_arguments_is_an_unknown_command() {
    let line = run_hook(&[], &static_provider()).await;
    assert_eq!(line, "{\"error\":\"unknown command\"}\n");
}

#[tokio::test]
async fn unrecognized_commands_are_unknown() {
    for argv in [
        vec!["Kerberos", "a", "b"],
        vec!["openidconnect", "a", "b"],
        vec!["OPENIDCONNECT", "a", "b"],
        vec!["--help"],
    ] {
        let value = run_hook_json(&argv, &static_provider()).await;
        assert_eq!(
            value,
            serde_json::json!({"error": "unknown command"}),
            "argv {argv:?} should be an unknown command"
        );
    }
}

#[tokio::test]
async fn missing_issuer_or_subject_is_an_exception_not_a_crash() {
    for argv in [vec!["OpenIdConnect"], vec!["OpenIdConnect", "issuer-only"]] {
        let value = run_hook_json(&argv, &static_provider()).await;

        assert_eq!(value["error"], "exception", "argv {argv:?}");
        assert!(value["details"].as_str().is_some_and(|s| !s.is_empty()));
        assert!(value["trace"].as_str().is_some_and(|s| !s.is_empty()));
    }
}

#[tokio::test]
async fn lookup_failures_become_exception_reports() {
    let value = run_hook_json(&["OpenIdConnect", "iss", "sub"], &BrokenProvider).await;

    assert_eq!(value["error"], "exception");
    assert!(
        value["details"]
            .as_str()
            .unwrap()
            .contains("backing store offline")
    );
    assert!(value["trace"].is_string());
}

#[tokio::test]
async fn json_special_characters_in_the_pair_are_escaped() {
    let issuer = r#"https://iss"uer\example"#;
    let subject = "sub\tject \"quoted\"";

    let value = run_hook_json(&["OpenIdConnect", issuer, subject], &static_provider()).await;

    assert_eq!(value["userIds"], serde_json::json!([[issuer, subject]]));
}

#[tokio::test]
async fn output_is_exactly_one_newline_terminated_line() {
    let line = run_hook(
        &["OpenIdConnect", "https://issuer.example", "sub-123"],
        &static_provider(),
    )
    .await;

    assert!(line.ends_with('\n'));
    assert_eq!(line.matches('\n').count(), 1);
}

#[tokio::test]
async fn repeated_invocations_are_byte_identical() {
    let argv = ["OpenIdConnect", "https://issuer.example", "sub-123"];
    let provider = OsUserProvider::new();

    let first = run_hook(&argv, &provider).await;
    let second = run_hook(&argv, &provider).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn extra_arguments_after_subject_are_ignored() {
    let value = run_hook_json(
        &["OpenIdConnect", "iss", "sub", "trailing", "noise"],
        &static_provider(),
    )
    .await;

    assert_eq!(value["userIds"], serde_json::json!([["iss", "sub"]]));
}
