//! `auth` command handler.

use linkpulse_core::{AppConfig, ConfigError};
use linkpulse_linkedin::OAuthClient;

/// Exchange the configured refresh token for a fresh access token and print
/// the token record as JSON.
///
/// # Errors
///
/// Returns an error when an OAuth credential is missing (checked before any
/// network call), the token endpoint rejects the exchange, or the response
/// carries no `access_token`.
pub(crate) async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let client_id = config
        .client_id
        .as_deref()
        .ok_or_else(|| ConfigError::MissingEnvVar("LINKEDIN_CLIENT_ID".to_string()))?;
    let client_secret = config
        .client_secret
        .as_deref()
        .ok_or_else(|| ConfigError::MissingEnvVar("LINKEDIN_CLIENT_SECRET".to_string()))?;
    let refresh_token = config
        .refresh_token
        .as_deref()
        .ok_or_else(|| ConfigError::MissingEnvVar("LINKEDIN_REFRESH_TOKEN".to_string()))?;

    let client = OAuthClient::new(&config.token_url, config.request_timeout_secs)?;
    let token = client
        .refresh_access_token(client_id, client_secret, refresh_token)
        .await?;

    println!("{}", serde_json::to_string_pretty(&token)?);
    Ok(())
}
