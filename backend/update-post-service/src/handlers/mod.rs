/// HTTP handlers for update-post-service
///
/// - Posts: edit the message of a caller-owned post
/// - Health: liveness check for the gateway / load balancer
pub mod health;
pub mod posts;

pub use health::health;
pub use posts::update_post;

use actix_web::web;

/// Route configuration shared by the server and the integration tests
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health))
            .route("/posts", web::put().to(update_post)),
    );
}
