//! Wire types for the LinkedIn REST responses this tool consumes.
//!
//! Decoding is deliberately tolerant: every field is optional with a serde
//! default and unknown fields are ignored, so a partial element parses
//! instead of failing the page. Callers decide which fields a record needs.

use serde::Deserialize;

/// Envelope for `GET /socialActions/{urn}/comments`.
#[derive(Debug, Default, Deserialize)]
pub struct CommentsPage {
    #[serde(default)]
    pub elements: Vec<CommentElement>,
}

/// One element of a social-actions comments response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentElement {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "commentUrn")]
    pub comment_urn: Option<String>,
    #[serde(default)]
    pub message: Option<CommentMessage>,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub created: Option<AuditStamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentMessage {
    #[serde(default)]
    pub text: Option<String>,
}

/// Creation/modification stamp shared by comments and reactions.
/// `time` is epoch milliseconds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditStamp {
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub impersonator: Option<String>,
}

/// Envelope for `GET /reactions/(entity:{urn})`.
#[derive(Debug, Default, Deserialize)]
pub struct ReactionsPage {
    #[serde(default)]
    pub elements: Vec<ReactionElement>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

/// One element of a reactions response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReactionElement {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "reactionType")]
    pub reaction_type: Option<String>,
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub created: Option<AuditStamp>,
    #[serde(default, rename = "lastModified")]
    pub last_modified: Option<AuditStamp>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub total: Option<u64>,
}
