//! HTTP client for the LinkedIn REST endpoints this tool consumes.
//!
//! Wraps `reqwest` with bearer auth, the `LinkedIn-Version` and
//! `X-Restli-Protocol-Version` headers, and typed response deserialization.
//! One GET per call: no retries, no pagination beyond the first page.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};

use crate::error::LinkedinError;
use crate::types::{CommentElement, CommentsPage, ReactionsPage};

const DEFAULT_BASE_URL: &str = "https://api.linkedin.com/rest";

/// Restli protocol version expected by the versioned REST endpoints.
const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

/// Client for the LinkedIn REST API.
///
/// Holds the HTTP client (with auth and versioning headers baked in) and the
/// base URL. Use [`LinkedinClient::new`] for production or
/// [`LinkedinClient::with_base_url`] to point at a mock server in tests.
pub struct LinkedinClient {
    client: Client,
    base_url: String,
}

impl LinkedinClient {
    /// Creates a new client pointed at the production LinkedIn REST API.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`LinkedinError::InvalidHeaderValue`] if the
    /// token or API version contain bytes not allowed in a header.
    pub fn new(
        access_token: &str,
        api_version: &str,
        user_agent: &str,
        timeout_secs: u64,
    ) -> Result<Self, LinkedinError> {
        Self::with_base_url(access_token, api_version, user_agent, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, [`LinkedinError::InvalidHeaderValue`] if the
    /// token or API version contain bytes not allowed in a header, or
    /// [`LinkedinError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        access_token: &str,
        api_version: &str,
        user_agent: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, LinkedinError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(|_| {
            LinkedinError::InvalidHeaderValue {
                header: "Authorization",
            }
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            "LinkedIn-Version",
            HeaderValue::from_str(api_version).map_err(|_| LinkedinError::InvalidHeaderValue {
                header: "LinkedIn-Version",
            })?,
        );
        headers.insert(
            "X-Restli-Protocol-Version",
            HeaderValue::from_static(RESTLI_PROTOCOL_VERSION),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        // Normalise: requests are built by appending path segments, so the
        // stored base must not end with a slash.
        let trimmed = base_url.trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| LinkedinError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: trimmed.to_owned(),
        })
    }

    /// Fetches the comments posted on a share or UGC post.
    ///
    /// Returns the response's `elements` array; a body without one decodes
    /// as an empty list.
    ///
    /// # Errors
    ///
    /// - [`LinkedinError::Http`] on network failure.
    /// - [`LinkedinError::UnexpectedStatus`] on a non-2xx response.
    /// - [`LinkedinError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_comments(
        &self,
        post_urn: &str,
    ) -> Result<Vec<CommentElement>, LinkedinError> {
        let url = self.comments_url(post_urn);
        let page: CommentsPage = self.get_json(&url).await?;
        Ok(page.elements)
    }

    /// Fetches the reactions on an activity, newest first.
    ///
    /// Returns the full page so callers can read `paging.total` alongside
    /// the elements.
    ///
    /// # Errors
    ///
    /// - [`LinkedinError::Http`] on network failure.
    /// - [`LinkedinError::UnexpectedStatus`] on a non-2xx response.
    /// - [`LinkedinError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_reactions(
        &self,
        activity_urn: &str,
    ) -> Result<ReactionsPage, LinkedinError> {
        let url = self.reactions_url(activity_urn);
        self.get_json(&url).await
    }

    /// Builds the social-actions comments URL for a post URN.
    ///
    /// The URN is percent-encoded into the path (`:` becomes `%3A`), matching
    /// the provider's addressing convention.
    fn comments_url(&self, post_urn: &str) -> String {
        let encoded = utf8_percent_encode(post_urn, NON_ALPHANUMERIC);
        format!("{}/socialActions/{encoded}/comments", self.base_url)
    }

    /// Builds the reactions-by-entity URL for an activity URN.
    ///
    /// The Restli finder syntax (`(entity:...)`, `(value:...)`) is part of
    /// the literal URL; only the URN itself is percent-encoded.
    fn reactions_url(&self, activity_urn: &str) -> String {
        let encoded = utf8_percent_encode(activity_urn, NON_ALPHANUMERIC);
        format!(
            "{}/reactions/(entity:{encoded})?q=entity&sort=(value:REVERSE_CHRONOLOGICAL)",
            self.base_url
        )
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    async fn get_json<T>(&self, url: &str) -> Result<T, LinkedinError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LinkedinError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| LinkedinError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
