use std::sync::Arc;

use finora_cli::commands::cli::{BudgetCommands, LoginArgs, OutputFormat, PeriodArgs, SignupArgs};
use finora_cli::commands::{account, budget};
use finora_core::api::{ApiError, AppConfig, CliError, SessionPhase};
use finora_plugins::{FileSessionStore, FinoraServices};
use mockito::Server;

async fn services(url: &str, dir: &std::path::Path) -> FinoraServices {
    let mut cfg = AppConfig::default();
    cfg.api.base_url = url.to_string();
    cfg.api.timeout_ms = 2_000;
    let store = Arc::new(FileSessionStore::new(dir, &cfg.session.namespace));
    FinoraServices::with_store(&cfg, store).await.unwrap()
}

#[tokio::test]
async fn login_then_restart_keeps_session() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/user/login")
        .with_status(200)
        .with_body(r#"{"token":"abc","user":{"id":1,"name":"A"}}"#)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();

    let first = services(&server.url(), dir.path()).await;
    account::handle_login(
        LoginArgs {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        },
        &first,
        OutputFormat::Text,
    )
    .await
    .unwrap();

    let second = services(&server.url(), dir.path()).await;
    assert_eq!(second.session.phase().await, SessionPhase::Authenticated);
    assert_eq!(second.session.token().await.as_deref(), Some("abc"));

    account::handle_logout(&second).await.unwrap();
    let third = services(&server.url(), dir.path()).await;
    assert_eq!(third.session.phase().await, SessionPhase::Idle);
}

#[tokio::test]
async fn session_view_hides_bearer_token() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/user/login")
        .with_status(200)
        .with_body(r#"{"token":"secret-bearer","user":{"id":1,"name":"A"}}"#)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let services = services(&server.url(), dir.path()).await;

    account::handle_login(
        LoginArgs {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        },
        &services,
        OutputFormat::Json,
    )
    .await
    .unwrap();

    let view = account::session_view(&services.session.snapshot().await);
    assert_eq!(view["signed_in"], serde_json::json!(true));
    assert_eq!(view["user"]["name"], serde_json::json!("A"));
    assert!(!view.to_string().contains("secret-bearer"));
}

#[tokio::test]
async fn failed_login_is_a_command_error() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/user/login")
        .with_status(401)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let services = services(&server.url(), dir.path()).await;

    let err = account::handle_login(
        LoginArgs {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        },
        &services,
        OutputFormat::Text,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CliError::Command(msg) if msg.contains("401")));
}

#[tokio::test]
async fn signup_mismatch_never_reaches_server() {
    let mut server = Server::new_async().await;
    let register = server
        .mock("POST", "/user/register")
        .expect(0)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let services = services(&server.url(), dir.path()).await;

    let err = account::handle_signup(
        SignupArgs {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
        },
        &services,
        OutputFormat::Text,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CliError::Api(ApiError::Validation(_))));
    register.assert_async().await;
}

#[tokio::test]
async fn budget_requires_session() {
    let server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let services = services(&server.url(), dir.path()).await;

    let err = budget::handle_budget(
        BudgetCommands::List(PeriodArgs {
            year: Some(2026),
            month: Some(10),
        }),
        &services,
        OutputFormat::Text,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CliError::Command(_)));
}
