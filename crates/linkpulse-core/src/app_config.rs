/// Runtime configuration for the `linkpulse` binary and its clients.
///
/// Built from environment variables by [`crate::config::load_app_config`].
/// Every field is optional or defaulted; each flow checks for the
/// credentials it actually needs and fails before doing any I/O when one
/// is absent.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub access_token: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub token_url: String,
    pub api_base_url: String,
    pub api_version: String,
    pub user_agent: String,
    pub post_urns: Vec<String>,
    pub activity_urns: Vec<String>,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[redacted]"),
            )
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .field("post_urns", &self.post_urns)
            .field("activity_urns", &self.activity_urns)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
