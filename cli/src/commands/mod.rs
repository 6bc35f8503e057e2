pub mod account;
pub mod budget;
pub mod cli;
pub mod onboard;

use finora_core::api::CliError;
use finora_plugins::FinoraServices;
use serde::Serialize;

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?;
    println!("{}", out);
    Ok(())
}

/// Commands that call bearer-protected endpoints need a stored token.
pub(crate) async fn require_session(services: &FinoraServices) -> Result<(), CliError> {
    if services.session.token().await.is_none() {
        return Err(CliError::Command(
            "not signed in, run `finora login` first".to_string(),
        ));
    }
    Ok(())
}
