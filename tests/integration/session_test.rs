//! Integration tests for the session store.

use gatekeep_core::traits::SessionProvider;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_memory_backend_without_redis_url() {
    let app = TestApp::new().await;
    assert_eq!(app.core.sessions.backend(), "memory");
}

#[tokio::test]
async fn test_session_add_is_idempotent() {
    let app = TestApp::new().await;
    let sessions = &app.core.sessions;

    sessions.add_user_session("user-1", "fp-a", "rt-1").await.unwrap();
    sessions.add_user_session("user-1", "fp-a", "rt-1").await.unwrap();

    let all = sessions.get_user_sessions("user-1").await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all.get("fp-a").map(String::as_str), Some("rt-1"));
}

#[tokio::test]
async fn test_sessions_isolated_per_fingerprint() {
    let app = TestApp::new().await;
    let sessions = &app.core.sessions;

    sessions.add_user_session("user-1", "fp-a", "rt-a").await.unwrap();
    sessions.add_user_session("user-1", "fp-b", "rt-b").await.unwrap();
    sessions.delete_user_session("user-1", "fp-a").await.unwrap();

    assert_eq!(sessions.get_user_session("user-1", "fp-a").await.unwrap(), "");
    assert_eq!(sessions.get_user_session("user-1", "fp-b").await.unwrap(), "rt-b");
}

#[tokio::test]
async fn test_delete_all_sessions() {
    let app = TestApp::new().await;
    let sessions = &app.core.sessions;

    for fp in ["fp-a", "fp-b", "fp-c"] {
        sessions.add_user_session("user-1", fp, "rt").await.unwrap();
    }
    sessions.delete_all_user_sessions("user-1").await.unwrap();

    assert!(sessions.get_user_sessions("user-1").await.unwrap().is_empty());
    for fp in ["fp-a", "fp-b", "fp-c"] {
        assert_eq!(sessions.get_user_session("user-1", fp).await.unwrap(), "");
    }
}

#[tokio::test]
async fn test_social_login_state() {
    let app = TestApp::new().await;
    let sessions = &app.core.sessions;

    sessions.set_social_login_state("nonce-1", "google").await.unwrap();
    assert_eq!(sessions.get_social_login_state("nonce-1").await.unwrap(), "google");
    assert_eq!(sessions.get_social_login_state("nonce-2").await.unwrap(), "");

    sessions.remove_social_login_state("nonce-1").await.unwrap();
    assert_eq!(sessions.get_social_login_state("nonce-1").await.unwrap(), "");
}

#[tokio::test]
async fn test_clear_store() {
    let app = TestApp::new().await;
    let sessions = &app.core.sessions;

    sessions.add_user_session("user-1", "fp-a", "rt").await.unwrap();
    sessions.add_user_session("user-2", "fp-a", "rt").await.unwrap();
    sessions.set_social_login_state("nonce", "github").await.unwrap();

    sessions.clear_store().await.unwrap();

    assert!(sessions.get_user_sessions("user-1").await.unwrap().is_empty());
    assert!(sessions.get_user_sessions("user-2").await.unwrap().is_empty());
    assert_eq!(sessions.get_social_login_state("nonce").await.unwrap(), "");
}

#[tokio::test]
async fn test_concurrent_adds_for_one_user() {
    let app = TestApp::new().await;
    let mut handles = Vec::new();

    for i in 0..32 {
        let sessions = app.core.sessions.clone();
        handles.push(tokio::spawn(async move {
            sessions
                .add_user_session("user-1", &format!("fp-{i}"), &format!("rt-{i}"))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let all = app.core.sessions.get_user_sessions("user-1").await.unwrap();
    assert_eq!(all.len(), 32);
    assert_eq!(all["fp-7"], "rt-7");
}
