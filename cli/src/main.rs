use clap::Parser;
use finora_cli::commands::{account, budget, cli, onboard};
use finora_cli::logging;
use finora_core::api::{ApiError, CliError, SessionEvent};
use finora_plugins::FinoraServices;

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let mut cfg =
        finora_core::api::load_default().map_err(|e| CliError::Config(e.to_string()))?;
    if let Some(url) = args.api_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        cfg.api.base_url = url.to_string();
    }
    logging::init(&cfg.logging)?;

    let services = FinoraServices::from_config(&cfg)
        .await
        .map_err(|e| CliError::Config(e.to_string()))?;

    let mut event_rx = services.session.subscribe();
    let result = dispatch(args.command, &services, args.format).await;

    // drain whatever the command produced before the process exits
    while let Ok(event) = event_rx.try_recv() {
        log_session_event(&event);
    }

    result.map(|()| 0)
}

fn log_session_event(event: &SessionEvent) {
    match event {
        SessionEvent::RequestStarted { from, .. } => {
            tracing::debug!(target: "finora.cli", "Session request started from {}", from);
        }
        SessionEvent::Authenticated { user, .. } => {
            tracing::info!(target: "finora.cli", "Signed in as {}", user);
        }
        SessionEvent::Failed { error, .. } => {
            tracing::warn!(target: "finora.cli", "Sign-in failed: {}", error);
        }
        SessionEvent::LoggedOut { from, .. } => {
            tracing::info!(target: "finora.cli", "Signed out (was {})", from);
        }
    }
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 12: rejected before any network call (validation, busy)
    // 20: network / IO error
    // 30: server rejected the request
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Api(api) => match api {
            ApiError::Validation(_) | ApiError::Busy => 12,
            ApiError::Timeout { .. } | ApiError::NetworkUnreachable { .. } => 20,
            ApiError::ServerError { .. } | ApiError::RegistrationFailed => 30,
            ApiError::Decode { .. } | ApiError::Transition(_) => 50,
        },
        CliError::Io(_) => 20,
        CliError::Command(_) => 20,
        CliError::Anyhow(_) => 50,
    }
}

async fn dispatch(
    cmd: cli::Commands,
    services: &FinoraServices,
    format: cli::OutputFormat,
) -> Result<(), CliError> {
    match cmd {
        cli::Commands::Login(args) => account::handle_login(args, services, format).await,
        cli::Commands::Signup(args) => account::handle_signup(args, services, format).await,
        cli::Commands::Verify(args) => account::handle_verify(args, services, format).await,
        cli::Commands::Logout => account::handle_logout(services).await,
        cli::Commands::Status => account::handle_status(services, format).await,
        cli::Commands::Onboard(args) => onboard::handle_onboard(args, services, format).await,
        cli::Commands::Budget(cmd) => budget::handle_budget(cmd, services, format).await,
        cli::Commands::Report => budget::handle_report(services, format).await,
    }
}
