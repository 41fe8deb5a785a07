//! The same dependent lookup, user → first post → comments, written three
//! ways:
//!
//! - [`callbacks`]: each step starts the next from inside its completion
//!   callback.
//! - [`chained`]: steps are composed with [`Chain::and_then`] into one
//!   future before anything is awaited.
//! - [`linear`]: plain `async`/`await` with `?`.
//!
//! All three visit the same [`Stage`]s, never start a lookup before the
//! previous one completed and stop at the first error. Each reports a
//! [`Run`].
//!
//! [`Chain::and_then`]: crate::chain::Chain::and_then

use tracing::{debug, warn};

use crate::{
    error::FetchError,
    model::{Comment, Id, Post, MISSING},
};

pub mod callbacks;
pub mod chained;
pub mod linear;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    UserFetched,
    PostsFetched,
    CommentsFetched,
    Failed,
}

/// Everything one sequencing run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Stages in the order they were entered, starting with [`Stage::Start`].
    pub stages: Vec<Stage>,
    pub outcome: Result<Vec<Comment>, FetchError>,
}

/// Stages visited so far by a run in progress.
#[derive(Debug)]
pub(crate) struct Stages(Vec<Stage>);

impl Stages {
    pub(crate) fn start() -> Self {
        debug!(stage = ?Stage::Start, "sequencer started");
        Self(vec![Stage::Start])
    }

    pub(crate) fn advance(&mut self, stage: Stage) {
        debug!(?stage, "sequencer advanced");
        self.0.push(stage);
    }

    pub(crate) fn finish(mut self, outcome: Result<Vec<Comment>, FetchError>) -> Run {
        if let Err(error) = &outcome {
            warn!(%error, after = ?self.0.last(), "sequencer failed");
            self.0.push(Stage::Failed);
        }
        Run {
            stages: self.0,
            outcome,
        }
    }
}

/// Identifier of the first post, or the missing identifier if there is none
/// so that the comment lookup reports it.
pub(crate) fn first_post_id(posts: &[Post]) -> Id {
    posts.first().map_or(MISSING, |post| post.id)
}
