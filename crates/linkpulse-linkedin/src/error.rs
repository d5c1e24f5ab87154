use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkedinError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("invalid value for the {header} header")]
    InvalidHeaderValue { header: &'static str },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("token endpoint returned status {status}: {body}")]
    TokenEndpoint { status: u16, body: String },

    #[error("token response did not include an access_token")]
    MissingAccessToken,
}
