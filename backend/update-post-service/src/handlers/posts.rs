/// Post handlers - HTTP endpoint for editing a post
use crate::db::PostStore;
use crate::error::{AppError, Result};
use crate::middleware::CallerIdentity;
use crate::models::Post;
use crate::services::PostService;
use actix_web::{http::header::ContentType, web, HttpResponse};

/// Update the message of a post owned by the caller
/// PUT /api/v1/posts
///
/// The body is the whole post; only `Message` and `UpdatedTimestamp` are
/// written. Responds with the post as received.
pub async fn update_post(
    store: web::Data<dyn PostStore>,
    caller: CallerIdentity,
    body: web::Bytes,
) -> Result<HttpResponse> {
    // Content-Type is not checked; the body is always decoded as JSON
    let post: Post = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(caller = %caller.0, error = %e, "Rejected undecodable post body");
        AppError::InvalidBody(e.to_string())
    })?;

    let service = PostService::new(store.into_inner());
    service.update_post(&caller.0, &post).await?;

    let payload =
        serde_json::to_string(&post).map_err(|e| AppError::Serialization(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(payload))
}
