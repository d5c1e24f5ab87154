//! OAuth2 refresh-token flow against the LinkedIn token endpoint.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LinkedinError;

/// Wire shape of a token endpoint response. Everything is optional here;
/// [`OAuthClient::refresh_access_token`] enforces what must be present.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
}

/// A refreshed access token and its metadata.
///
/// `expires_at` is computed from `expires_in` at the moment the response is
/// parsed, so callers get an absolute instant instead of a countdown.
#[derive(Clone, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[redacted]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Client for the OAuth2 token endpoint.
///
/// Use [`OAuthClient::new`] with the configured token URL; tests point it at
/// a mock server.
pub struct OAuthClient {
    client: reqwest::Client,
    token_url: String,
}

impl OAuthClient {
    /// Creates a client for the given token endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token_url: &str, timeout_secs: u64) -> Result<Self, LinkedinError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            token_url: token_url.to_owned(),
        })
    }

    /// Exchanges a refresh token for a fresh access token.
    ///
    /// Sends the standard `grant_type=refresh_token` form POST. A missing
    /// `token_type` in the response defaults to `"Bearer"`.
    ///
    /// # Errors
    ///
    /// - [`LinkedinError::Http`] on network failure.
    /// - [`LinkedinError::TokenEndpoint`] on a non-success status, carrying
    ///   the status and response body.
    /// - [`LinkedinError::Deserialize`] if the body is not valid JSON.
    /// - [`LinkedinError::MissingAccessToken`] if a success response carries
    ///   no `access_token`.
    pub async fn refresh_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<AccessToken, LinkedinError> {
        let response = self
            .client
            .post(&self.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LinkedinError::TokenEndpoint {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| LinkedinError::Deserialize {
                context: self.token_url.clone(),
                source: e,
            })?;

        let access_token = parsed.access_token.ok_or(LinkedinError::MissingAccessToken)?;
        let token_type = parsed.token_type.unwrap_or_else(|| "Bearer".to_string());
        let expires_at = parsed
            .expires_in
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| Utc::now().checked_add_signed(delta));

        tracing::info!(expires_in = ?parsed.expires_in, "refreshed access token");

        Ok(AccessToken {
            access_token,
            token_type,
            expires_in: parsed.expires_in,
            scope: parsed.scope,
            expires_at,
        })
    }
}
