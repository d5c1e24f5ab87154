use crate::app_config::AppConfig;
use crate::targets::parse_target_list;
use crate::ConfigError;

/// Production default for the LinkedIn token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";

/// Production default for the LinkedIn REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.linkedin.com/rest";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
///
/// No variable is required here: credentials stay `Option`s and each flow
/// rejects a missing one with [`ConfigError::MissingEnvVar`] before any I/O.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("LINKPULSE_LOG_LEVEL", "info");

    let access_token = lookup("LINKEDIN_ACCESS_TOKEN").ok();
    let client_id = lookup("LINKEDIN_CLIENT_ID").ok();
    let client_secret = lookup("LINKEDIN_CLIENT_SECRET").ok();
    let refresh_token = lookup("LINKEDIN_REFRESH_TOKEN").ok();

    let token_url = or_default("LINKPULSE_TOKEN_URL", DEFAULT_TOKEN_URL);
    let api_base_url = or_default("LINKPULSE_API_BASE_URL", DEFAULT_API_BASE_URL);
    let api_version = or_default("LINKPULSE_API_VERSION", "202502");
    let user_agent = or_default(
        "LINKPULSE_USER_AGENT",
        "linkpulse/0.1 (engagement-monitoring)",
    );

    let post_urns = parse_target_list(&or_default("LINKPULSE_POST_URNS", ""));
    let activity_urns = parse_target_list(&or_default("LINKPULSE_ACTIVITY_URNS", ""));

    let poll_interval_secs = parse_u64("LINKPULSE_POLL_INTERVAL_SECS", "1800")?;
    if poll_interval_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LINKPULSE_POLL_INTERVAL_SECS".to_string(),
            reason: "poll interval must be at least 1 second".to_string(),
        });
    }
    let request_timeout_secs = parse_u64("LINKPULSE_REQUEST_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        log_level,
        access_token,
        client_id,
        client_secret,
        refresh_token,
        token_url,
        api_base_url,
        api_version,
        user_agent,
        post_urns,
        activity_urns,
        poll_interval_secs,
        request_timeout_secs,
    })
}
