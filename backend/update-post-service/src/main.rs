use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{anyhow, Context};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use update_post_service::db::{DynamoPostStore, PostStore};
use update_post_service::handlers;
use update_post_service::middleware::{IdentityExtractor, RequestContextIdentity};
use update_post_service::Config;

const DEFAULT_LOG_FILTER: &str = "info,actix_web=info,aws_config=warn,aws_smithy_runtime=warn";

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if json {
        // JSON lines for CloudWatch
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: Failed to load configuration: {}", e);
            return Err(anyhow!("Configuration loading failed: {}", e));
        }
    };

    init_tracing(config.app.json_logs);

    tracing::info!("Starting update-post-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // One client per process, shared by every request served by this instance
    let store: Arc<dyn PostStore> = Arc::new(DynamoPostStore::from_config(&config.dynamodb).await);
    let store_data = web::Data::from(store);

    let identity: Arc<dyn IdentityExtractor> = Arc::new(RequestContextIdentity);
    let identity_data = web::Data::from(identity);

    let bind_address = config.bind_address();
    tracing::info!("HTTP server listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .app_data(identity_data.clone())
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure_routes)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .shutdown_timeout(10)
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    tracing::info!("update-post-service shutting down");

    Ok(())
}
