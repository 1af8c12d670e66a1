/// Ownership checks for post mutations
use crate::error::AppError;
use crate::models::Post;

/// Result type for permission checks
pub type PermissionResult = Result<(), AppError>;

/// Check if a user owns a post
///
/// Exact comparison of the caller's username with the post's `UserId`; only
/// the owner may modify a post.
pub fn check_post_ownership(username: &str, post: &Post) -> PermissionResult {
    if post.user_id == username {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "calling user is trying to edit a post that does not belong to them".to_string(),
        ))
    }
}
