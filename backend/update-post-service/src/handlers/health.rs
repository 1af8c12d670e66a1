use actix_web::HttpResponse;

/// Liveness check
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "update-post-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
