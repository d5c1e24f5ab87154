pub mod comments;
pub mod error;
pub mod reactions;
pub mod window;

pub use comments::{detect_new_comments, Comment, CommentCycleResult};
pub use error::EngineError;
pub use reactions::{
    aggregate_reactions, collect_reactions, AnalyticsReport, Reaction, TargetReport,
};
pub use window::PollWindow;
