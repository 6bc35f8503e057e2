//! Login, signup, verification and session status commands.
use crate::commands::cli::{LoginArgs, OutputFormat, SignupArgs, VerifyArgs};
use crate::commands::print_json;
use finora_core::api::{
    validate_signup, ApiError, CliError, LoginPayload, RegisterPayload, ResumeOutcome, Session,
    SessionTransition, VerifyTokenPayload,
};
use finora_plugins::FinoraServices;
use serde_json::{json, Value};

/// JSON shape printed by `login` and `status`. The bearer token never
/// leaves the session store through stdout.
pub fn session_view(session: &Session) -> Value {
    json!({
        "phase": session.phase(),
        "signed_in": session.is_authenticated(),
        "user": session.user(),
        "last_error": session.last_error(),
    })
}

pub async fn handle_login(
    args: LoginArgs,
    services: &FinoraServices,
    format: OutputFormat,
) -> Result<(), CliError> {
    let payload = LoginPayload {
        email: args.email,
        password: args.password,
    };
    let result = services.auth.login(payload).await?;
    let session = services.session.snapshot().await;

    if result.is_none() {
        let reason = session.last_error().unwrap_or("unknown error");
        return Err(CliError::Command(format!("login failed: {}", reason)));
    }

    match format {
        OutputFormat::Json => print_json(&session_view(&session))?,
        OutputFormat::Text => {
            let name = session.user().map(|u| u.display_name()).unwrap_or_default();
            println!("Signed in as {}", name);
        }
    }
    Ok(())
}

pub async fn handle_signup(
    args: SignupArgs,
    services: &FinoraServices,
    format: OutputFormat,
) -> Result<(), CliError> {
    validate_signup(&args.name, &args.email, &args.password, &args.confirm_password)
        .map_err(ApiError::from)?;

    let payload = RegisterPayload {
        name: args.name,
        email: args.email.clone(),
        password: args.password,
    };
    let created = services.auth.register(payload).await?;

    match format {
        OutputFormat::Json => print_json(&created)?,
        OutputFormat::Text => {
            println!("Account created for {}.", args.email);
            println!("Run `finora login` to sign in, then `finora onboard` to pick your sources.");
        }
    }
    Ok(())
}

pub async fn handle_verify(
    args: VerifyArgs,
    services: &FinoraServices,
    format: OutputFormat,
) -> Result<(), CliError> {
    if let Some(token) = args.token {
        let body = services
            .auth
            .verify_token(VerifyTokenPayload { token })
            .await?;
        match format {
            OutputFormat::Json => print_json(&body)?,
            OutputFormat::Text => println!("Token is valid"),
        }
        return Ok(());
    }

    match services.auth.resume().await? {
        ResumeOutcome::SignedOut => {
            match format {
                OutputFormat::Json => print_json(&json!({"status": "signed_out"}))?,
                OutputFormat::Text => println!("Not signed in"),
            }
            Ok(())
        }
        ResumeOutcome::Verified(body) => {
            match format {
                OutputFormat::Json => print_json(&json!({"status": "verified", "body": body}))?,
                OutputFormat::Text => println!("Session verified"),
            }
            Ok(())
        }
        ResumeOutcome::Rejected(err) => {
            eprintln!("Stored session was rejected and has been cleared");
            Err(err.into())
        }
        ResumeOutcome::Unverified(err) => {
            eprintln!("Could not verify the stored session; it was kept");
            Err(err.into())
        }
    }
}

pub async fn handle_logout(services: &FinoraServices) -> Result<(), CliError> {
    services.auth.logout().await?;
    println!("Signed out");
    Ok(())
}

pub async fn handle_status(
    services: &FinoraServices,
    format: OutputFormat,
) -> Result<(), CliError> {
    let session = services.session.snapshot().await;
    match format {
        OutputFormat::Json => print_json(&session_view(&session))?,
        OutputFormat::Text => {
            println!(
                "Phase: {} ({})",
                session.phase(),
                SessionTransition::phase_description(session.phase())
            );
            if let Some(user) = session.user() {
                println!("User:  {}", user.display_name());
            }
            if let Some(err) = session.last_error() {
                println!("Error: {}", err);
            }
        }
    }
    Ok(())
}
