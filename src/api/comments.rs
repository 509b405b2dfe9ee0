use log::{debug, info, warn};
use serde::Serialize;
use std::thread;

use super::client::QueryClient;
use super::error::ApiError;
use super::request::RequestOptions;
use crate::models::{Comment, CommentDraft, CommentThread, Envelope, User};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewComment<'a> {
    #[serde(flatten)]
    draft: &'a CommentDraft,
    post_id: u64,
}

impl QueryClient {
    /// Comments of a post, each enriched with its author's full record.
    ///
    /// Author lookups run concurrently. A failed lookup leaves that comment with
    /// the partial user reference it arrived with; it is never dropped and never
    /// fails the batch.
    pub fn get_post_comments(&self, post_id: u64) -> Result<CommentThread, ApiError> {
        let Envelope { items, total, .. }: Envelope<Comment> = self.request(
            &format!("/posts/{}/comments", post_id),
            RequestOptions::get(),
        )?;
        debug!("Enriching {} comments of post {}", items.len(), post_id);

        let comments = thread::scope(|scope| {
            let lookups: Vec<_> = items
                .into_iter()
                .map(|comment| {
                    let user_id = comment.user.id;
                    let handle = scope.spawn(move || self.lookup_user(user_id));
                    (comment, handle)
                })
                .collect();

            lookups
                .into_iter()
                .map(|(mut comment, handle)| {
                    match handle.join() {
                        Ok(Ok(user)) => comment.author = Some(user),
                        Ok(Err(e)) => warn!(
                            "Could not load user {} for comment {}: {}",
                            comment.user.id, comment.id, e
                        ),
                        Err(_) => warn!(
                            "User lookup for comment {} panicked; keeping the partial reference",
                            comment.id
                        ),
                    }
                    comment
                })
                .collect::<Vec<_>>()
        });

        Ok(CommentThread { comments, total })
    }

    fn lookup_user(&self, user_id: u64) -> Result<User, ApiError> {
        self.request(&format!("/users/{}", user_id), RequestOptions::get())
    }

    pub fn add_comment(&self, post_id: u64, draft: &CommentDraft) -> Result<Comment, ApiError> {
        let payload = NewComment { draft, post_id };
        let comment: Comment =
            self.request("/comments/add", RequestOptions::post().json(&payload)?)?;
        info!("Added comment {} to post {}", comment.id, post_id);
        Ok(comment)
    }

    pub fn delete_comment(&self, comment_id: u64) -> Result<Comment, ApiError> {
        let comment: Comment = self.request(
            &format!("/comments/{}", comment_id),
            RequestOptions::delete(),
        )?;
        info!("Deleted comment {}", comment_id);
        Ok(comment)
    }
}
