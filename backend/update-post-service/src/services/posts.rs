/// Post service - authorize-then-update for caller-owned posts
use crate::db::PostStore;
use crate::error::Result;
use crate::middleware::check_post_ownership;
use crate::models::Post;
use std::sync::Arc;

pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Update a post's message and updated timestamp on behalf of `username`.
    ///
    /// The store is only touched once ownership is established. Key fields are
    /// taken from `post` as-is and never rewritten.
    pub async fn update_post(&self, username: &str, post: &Post) -> Result<()> {
        if let Err(err) = check_post_ownership(username, post) {
            tracing::warn!(
                caller = %username,
                owner = %post.user_id,
                message_id = %post.message_id,
                "Rejected update of a post owned by another user"
            );
            return Err(err);
        }

        if let Err(err) = self.store.update_post(&post.key(), &post.changes()).await {
            tracing::error!(
                user_id = %post.user_id,
                message_id = %post.message_id,
                retryable = err.is_retryable(),
                error = %err,
                "Post update failed"
            );
            return Err(err.into());
        }

        tracing::info!(
            user_id = %post.user_id,
            message_id = %post.message_id,
            "Post updated"
        );

        Ok(())
    }
}
