//! Comment change detection.
//!
//! One cycle fetches every tracked post's comments, keeps those created
//! strictly after the window's watermark, and reports the newest along with
//! the full new set. The cycle is fail-closed: any target's fetch failure
//! aborts it, since a partial set could silently under-report new comments.

use chrono::{DateTime, Utc};
use serde::Serialize;

use linkpulse_linkedin::{CommentElement, LinkedinClient};

use crate::error::EngineError;
use crate::window::{datetime_from_millis, PollWindow};

/// One new comment on a tracked post.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub target: String,
    pub comment_id: Option<String>,
    pub comment_urn: Option<String>,
    pub text: String,
    pub actor_urn: Option<String>,
    /// Set when the comment was posted by an organization on the actor's
    /// behalf.
    pub agent_urn: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload emitted by a cycle that found at least one new comment.
#[derive(Debug, Clone, Serialize)]
pub struct CommentCycleResult {
    pub latest: Comment,
    pub count: usize,
    pub new_comments: Vec<Comment>,
}

/// Runs one comment-detection cycle over the given targets.
///
/// Returns `Ok(None)` when the target list is empty (logged, not an error)
/// or when nothing qualified against the watermark. Elements lacking a
/// creation time or a message are dropped silently; only comments created
/// strictly after the watermark count as new.
///
/// # Errors
///
/// Returns [`EngineError::CommentFetch`] for the first target whose fetch
/// fails; no partial result is emitted.
pub async fn detect_new_comments(
    client: &LinkedinClient,
    targets: &[String],
    window: PollWindow,
) -> Result<Option<CommentCycleResult>, EngineError> {
    if targets.is_empty() {
        tracing::warn!("no posts configured, skipping comment check");
        return Ok(None);
    }

    let watermark = window.watermark();
    tracing::info!(
        posts = targets.len(),
        watermark = %watermark,
        "checking posts for new comments"
    );

    let mut new_comments: Vec<Comment> = Vec::new();
    for target in targets {
        let elements =
            client
                .fetch_comments(target)
                .await
                .map_err(|source| EngineError::CommentFetch {
                    target: target.clone(),
                    source,
                })?;

        for element in &elements {
            let Some(comment) = parse_comment(target, element) else {
                continue;
            };
            if comment.created_at > watermark {
                new_comments.push(comment);
            }
        }
    }

    let Some(best) = latest_index(&new_comments) else {
        tracing::info!("no new comments found");
        return Ok(None);
    };
    let latest = new_comments[best].clone();

    tracing::info!(
        count = new_comments.len(),
        latest = %latest.created_at,
        "found new comments"
    );

    Ok(Some(CommentCycleResult {
        latest,
        count: new_comments.len(),
        new_comments,
    }))
}

/// Parses one raw element into a [`Comment`].
///
/// Returns `None` when the element lacks a creation time or a message;
/// such elements are dropped, never surfaced as errors.
fn parse_comment(target: &str, element: &CommentElement) -> Option<Comment> {
    let created_at = element
        .created
        .as_ref()
        .and_then(|stamp| stamp.time)
        .and_then(datetime_from_millis)?;
    let message = element.message.as_ref()?;

    Some(Comment {
        target: target.to_string(),
        comment_id: element.id.clone(),
        comment_urn: element.comment_urn.clone(),
        text: message.text.clone().unwrap_or_default(),
        actor_urn: element.actor.clone(),
        agent_urn: element.agent.clone(),
        created_at,
    })
}

/// Index of the newest comment. The comparison is strictly-greater so the
/// first-encountered comment wins ties, keeping selection stable for a
/// fixed target and element order.
fn latest_index(comments: &[Comment]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, comment) in comments.iter().enumerate() {
        let newer = match best {
            None => true,
            Some(b) => comment.created_at > comments[b].created_at,
        };
        if newer {
            best = Some(idx);
        }
    }
    best
}
