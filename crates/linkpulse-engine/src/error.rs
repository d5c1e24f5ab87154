use linkpulse_linkedin::LinkedinError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to fetch comments for {target}: {source}")]
    CommentFetch {
        target: String,
        #[source]
        source: LinkedinError,
    },

    #[error("failed to fetch reactions for {target}: {source}")]
    ReactionFetch {
        target: String,
        #[source]
        source: LinkedinError,
    },
}
