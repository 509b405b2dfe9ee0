use log::{debug, info, warn};

use crate::api::{ApiError, QueryClient};
use crate::models::{Post, PostPatch};

/// A "like" in flight: the count before it, and the count shown until the
/// server answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionUpdate {
    pub post_id: u64,
    pub previous: u64,
    pub speculative: u64,
}

/// Outcome of reconciling a like with the server's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    /// The count to display; always the server's
    pub reactions: u64,
    /// Whether the server agreed with the speculative count
    pub agreed: bool,
}

impl ReactionUpdate {
    pub fn like(post: &Post) -> Self {
        Self {
            post_id: post.id,
            previous: post.reactions,
            speculative: post.reactions.saturating_add(1),
        }
    }

    pub fn patch(&self) -> PostPatch {
        PostPatch {
            reactions: Some(self.speculative),
            ..PostPatch::default()
        }
    }

    /// The server's count replaces the speculative one, whatever it is.
    pub fn reconcile(&self, server: &Post) -> Reconciled {
        let agreed = server.reactions == self.speculative;
        if !agreed {
            debug!(
                "Server reports {} reactions for post {}, expected {}",
                server.reactions, self.post_id, self.speculative
            );
        }
        Reconciled {
            reactions: server.reactions,
            agreed,
        }
    }
}

impl QueryClient {
    /// Add one reaction to `post`.
    ///
    /// `post.reactions` shows the speculative count while the update is sent, then
    /// takes the server's count. On failure it goes back to the previous count.
    pub fn like_post(&self, post: &mut Post) -> Result<Reconciled, ApiError> {
        let update = ReactionUpdate::like(post);
        post.reactions = update.speculative;

        match self.update_post(update.post_id, &update.patch()) {
            Ok(server) => {
                let reconciled = update.reconcile(&server);
                post.reactions = reconciled.reactions;
                info!(
                    "Post {} now has {} reactions",
                    post.id, reconciled.reactions
                );
                Ok(reconciled)
            }
            Err(e) => {
                warn!("Failed to like post {}: {}", post.id, e);
                post.reactions = update.previous;
                Err(e)
            }
        }
    }
}
