//! Integration tests for verification tokens.

use chrono::Duration;

use gatekeep_core::env::keys;
use gatekeep_core::error::ErrorKind;
use gatekeep_database::repositories::VerificationRepository;
use gatekeep_entity::verification::VerificationIdentifier;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_issue_dispatches_email() {
    let app = TestApp::new().await;
    let token = app
        .core
        .verification
        .issue("Bob@Example.com", VerificationIdentifier::BasicAuthSignup)
        .await
        .unwrap();

    let sent = app.mailer.wait_for(1).await;
    assert_eq!(sent[0].email, "bob@example.com");
    assert_eq!(sent[0].token, token);
    assert_eq!(sent[0].identifier, VerificationIdentifier::BasicAuthSignup);
}

#[tokio::test]
async fn test_token_is_single_use() {
    let app = TestApp::new().await;
    let verification = &app.core.verification;

    let token = verification
        .issue("bob@example.com", VerificationIdentifier::ForgotPassword)
        .await
        .unwrap();

    let request = verification.validate_and_consume(&token).await.unwrap();
    assert_eq!(request.email, "bob@example.com");
    assert_eq!(request.identifier, "forgot_password");

    let err = verification.validate_and_consume(&token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.public_message(), "invalid token");
}

#[tokio::test]
async fn test_expired_token_with_valid_signature() {
    let app = TestApp::new().await;
    let verification = app
        .core
        .verification
        .as_ref()
        .clone()
        .with_expiry(Duration::seconds(-1));

    let token = verification
        .issue("bob@example.com", VerificationIdentifier::MagicLinkLogin)
        .await
        .unwrap();

    let err = verification.validate(&token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Expired);
    assert_eq!(err.public_message(), "invalid token");
}

#[tokio::test]
async fn test_reissue_keeps_one_live_request() {
    let app = TestApp::new().await;
    let verification = &app.core.verification;

    let first = verification
        .issue("bob@example.com", VerificationIdentifier::UpdateEmail)
        .await
        .unwrap();
    let second = verification
        .issue("BOB@example.com", VerificationIdentifier::UpdateEmail)
        .await
        .unwrap();
    assert_ne!(first, second);
    assert_eq!(app.verification_repo.len().await, 1);

    let stored = app
        .verification_repo
        .find_by_email_identifier("bob@example.com", "update_email")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.token, second);

    assert_eq!(
        verification.validate(&first).await.unwrap_err().kind,
        ErrorKind::NotFound
    );
    assert!(verification.validate(&second).await.is_ok());
}

#[tokio::test]
async fn test_purposes_do_not_collide() {
    let app = TestApp::new().await;
    let verification = &app.core.verification;

    for id in VerificationIdentifier::ALL {
        verification.issue("bob@example.com", id).await.unwrap();
    }
    assert_eq!(app.verification_repo.len().await, 4);
}

#[tokio::test]
async fn test_tampered_token_is_rejected() {
    let app = TestApp::new().await;
    let token = app
        .core
        .verification
        .issue("bob@example.com", VerificationIdentifier::BasicAuthSignup)
        .await
        .unwrap();

    let mut tampered = token.clone();
    tampered.push('x');
    let err = app.core.verification.validate(&tampered).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn test_disabled_purpose_is_refused() {
    let app = TestApp::new().await;
    app.core.env.set_bool(keys::DISABLE_MAGIC_LINK_LOGIN, true);

    let err = app
        .core
        .verification
        .issue("bob@example.com", VerificationIdentifier::MagicLinkLogin)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Disabled);
    assert!(app.verification_repo.is_empty().await);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_missing_smtp_disables_verification() {
    use std::sync::Arc;

    use gatekeep_core::env::MapEnv;
    use gatekeep_database::memory::MemoryEnvRepository;

    let repo = Arc::new(MemoryEnvRepository::new());
    // First boot stores the defaults; the second reconciles them.
    TestApp::boot(repo.clone(), MapEnv::new()).await.unwrap();
    let app = TestApp::boot(repo, MapEnv::new()).await.unwrap();

    let err = app
        .core
        .verification
        .issue("bob@example.com", VerificationIdentifier::UpdateEmail)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Disabled);
}

#[tokio::test]
async fn test_cleanup_removes_only_expired_requests() {
    use std::sync::Arc;

    use gatekeep_service::VerificationCleanup;

    let app = TestApp::new().await;
    let expired = app
        .core
        .verification
        .as_ref()
        .clone()
        .with_expiry(Duration::seconds(-60));

    expired
        .issue("old@example.com", VerificationIdentifier::ForgotPassword)
        .await
        .unwrap();
    let live = app
        .core
        .verification
        .issue("new@example.com", VerificationIdentifier::ForgotPassword)
        .await
        .unwrap();

    let cleanup = VerificationCleanup::new(
        Arc::clone(&app.core.verification),
        std::time::Duration::from_secs(3600),
    );
    assert_eq!(cleanup.run_once().await, 1);
    assert_eq!(app.verification_repo.len().await, 1);
    assert!(app.core.verification.validate(&live).await.is_ok());
}
