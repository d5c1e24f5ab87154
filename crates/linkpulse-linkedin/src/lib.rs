pub mod client;
pub mod error;
pub mod oauth;
pub mod types;

pub use client::LinkedinClient;
pub use error::LinkedinError;
pub use oauth::{AccessToken, OAuthClient};
pub use types::{
    AuditStamp, CommentElement, CommentMessage, CommentsPage, Paging, ReactionElement,
    ReactionsPage,
};
