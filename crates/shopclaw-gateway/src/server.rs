//! HTTP server implementation using Axum.

use axum::{
    Router,
    routing::{get, post},
};
use shopclaw_core::config::{GatewayConfig, ShopClawConfig};
use shopclaw_knowledge::{FileStore, KnowledgeStore};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    pub gateway_config: GatewayConfig,
    /// Knowledge document store — injected so tests can swap in MemStore.
    pub store: Arc<dyn KnowledgeStore>,
    pub start_time: std::time::Instant,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    build_router_from_arc(Arc::new(state))
}

pub fn build_router_from_arc(shared: Arc<AppState>) -> Router {
    Router::new()
        // Chat
        .route("/api/chat", post(super::routes::chat))
        // Products
        .route(
            "/api/products",
            get(super::routes::list_products).post(super::routes::add_product),
        )
        .route(
            "/api/products/{id}",
            axum::routing::put(super::routes::update_product)
                .delete(super::routes::delete_product),
        )
        // FAQs
        .route(
            "/api/faqs",
            get(super::routes::list_faqs).post(super::routes::add_faq),
        )
        .route(
            "/api/faqs/{id}",
            axum::routing::put(super::routes::update_faq).delete(super::routes::delete_faq),
        )
        // Policies
        .route(
            "/api/policies",
            get(super::routes::list_policies).post(super::routes::add_policy),
        )
        .route(
            "/api/policies/{id}",
            axum::routing::put(super::routes::update_policy)
                .delete(super::routes::delete_policy),
        )
        // Custom knowledge
        .route(
            "/api/knowledge",
            get(super::routes::list_knowledge).post(super::routes::add_knowledge),
        )
        .route(
            "/api/knowledge/{id}",
            axum::routing::put(super::routes::update_knowledge)
                .delete(super::routes::delete_knowledge),
        )
        // Store info
        .route(
            "/api/store-info",
            get(super::routes::get_store_info).put(super::routes::update_store_info),
        )
        // Export/Import the whole document
        .route("/api/memory/export", get(super::routes::export_memory))
        .route("/api/memory/import", post(super::routes::import_memory))
        // Service meta
        .route("/api/info", get(super::routes::system_info))
        .route("/health", get(super::routes::health_check))
        .layer({
            let cors = CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers(Any)
                .max_age(std::time::Duration::from_secs(3600));

            // Restrict CORS origins in production via env var
            // Example: SHOPCLAW_CORS_ORIGINS=https://shop.example.com,https://admin.example.com
            if let Ok(origins_str) = std::env::var("SHOPCLAW_CORS_ORIGINS") {
                let origins: Vec<_> = origins_str
                    .split(',')
                    .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
                    .collect();
                cors.allow_origin(origins)
            } else {
                // Development fallback — allow all origins
                cors.allow_origin(Any)
            }
        })
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server.
pub async fn start(config: &ShopClawConfig) -> anyhow::Result<()> {
    let data_dir = PathBuf::from(shellexpand::tilde(&config.storage.data_dir).to_string());
    let store = FileStore::new(&data_dir);

    match store.load() {
        Ok(kb) => tracing::info!(
            "📚 Knowledge base: {} products, {} faqs, {} policies, {} custom entries",
            kb.products.len(),
            kb.faqs.len(),
            kb.policies.len(),
            kb.custom_knowledge.len()
        ),
        Err(e) => tracing::warn!("⚠️ Knowledge base not readable: {e}"),
    }

    let state = AppState {
        gateway_config: config.gateway.clone(),
        store: Arc::new(store),
        start_time: std::time::Instant::now(),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🌐 Gateway server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
