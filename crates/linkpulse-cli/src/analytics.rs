//! `analytics` command handler.

use linkpulse_core::{AppConfig, ConfigError};
use linkpulse_engine::{aggregate_reactions, collect_reactions};
use linkpulse_linkedin::LinkedinClient;

/// Fetch reactions for every tracked activity and print the aggregated
/// report as JSON.
///
/// URNs passed on the command line override the configured watch list.
/// Every target is attempted even when one fails; without `--allow-partial`
/// the first failure then fails the command, with it the report is printed
/// with per-target errors inline.
///
/// # Errors
///
/// Returns an error when the access token is missing or the resolved target
/// list is empty (both checked before any network call), or — without
/// `--allow-partial` — when any target's fetch failed.
pub(crate) async fn run(
    config: &AppConfig,
    urns: Vec<String>,
    allow_partial: bool,
) -> anyhow::Result<()> {
    let access_token = config
        .access_token
        .as_deref()
        .ok_or_else(|| ConfigError::MissingEnvVar("LINKEDIN_ACCESS_TOKEN".to_string()))?;

    let targets = if urns.is_empty() {
        config.activity_urns.clone()
    } else {
        urns
    };
    if targets.is_empty() {
        return Err(ConfigError::MissingEnvVar("LINKPULSE_ACTIVITY_URNS".to_string()).into());
    }

    let client = LinkedinClient::with_base_url(
        access_token,
        &config.api_version,
        &config.user_agent,
        config.request_timeout_secs,
        &config.api_base_url,
    )?;

    let report = if allow_partial {
        aggregate_reactions(&client, &targets).await
    } else {
        collect_reactions(&client, &targets).await?
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
