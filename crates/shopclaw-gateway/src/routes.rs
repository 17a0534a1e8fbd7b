//! API route handlers for the gateway.
//!
//! Every CRUD handler runs one load → mutate → save cycle against the
//! knowledge store; the chat handler treats the loaded document as an
//! immutable snapshot for the duration of the request.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use shopclaw_core::ShopClawError;
use shopclaw_knowledge::model::{
    CustomEntry, Faq, KnowledgeBase, Policy, Product, StoreInfoPatch, generate_id,
};

use super::server::AppState;

/// Inbound chat message. The session id is opaque and echoed unchanged.
#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

fn store_error(e: ShopClawError) -> Response {
    tracing::error!("❌ Knowledge store failure: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"detail": e.to_string()})),
    )
        .into_response()
}

fn not_found(entity: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"detail": format!("{entity} not found")})),
    )
        .into_response()
}

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "shopclaw-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// System information endpoint.
pub async fn system_info(State(state): State<Arc<AppState>>) -> Response {
    let kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    let uptime = state.start_time.elapsed();
    Json(serde_json::json!({
        "name": kb.store_info.name,
        "version": env!("CARGO_PKG_VERSION"),
        "platform": format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        "uptime_secs": uptime.as_secs(),
        "counts": {
            "products": kb.products.len(),
            "faqs": kb.faqs.len(),
            "policies": kb.policies.len(),
            "custom_knowledge": kb.custom_knowledge.len(),
        },
        "gateway": {
            "host": state.gateway_config.host,
            "port": state.gateway_config.port,
        }
    }))
    .into_response()
}

/// Chat endpoint: normalize → match → compose against the current document.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(msg): Json<ChatMessage>,
) -> Response {
    let kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    let reply = shopclaw_knowledge::answer(&msg.message, &kb);
    Json(serde_json::json!({
        "response": reply,
        "session_id": msg.session_id,
    }))
    .into_response()
}

// ─── Products ──────────────────────────────────────────────

pub async fn list_products(State(state): State<Arc<AppState>>) -> Response {
    match state.store.load() {
        Ok(kb) => Json(kb.products).into_response(),
        Err(e) => store_error(e),
    }
}

pub async fn add_product(
    State(state): State<Arc<AppState>>,
    Json(mut product): Json<Product>,
) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    product.id = generate_id();
    kb.products.push(product.clone());
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(product).into_response()
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut product): Json<Product>,
) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    let Some(slot) = kb.products.iter_mut().find(|p| p.id == id) else {
        return not_found("Product");
    };
    // The id is immutable after creation — the path wins over the body.
    product.id = id;
    *slot = product.clone();
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(product).into_response()
}

pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    kb.products.retain(|p| p.id != id);
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(serde_json::json!({"message": "Product deleted"})).into_response()
}

// ─── FAQs ──────────────────────────────────────────────────

pub async fn list_faqs(State(state): State<Arc<AppState>>) -> Response {
    match state.store.load() {
        Ok(kb) => Json(kb.faqs).into_response(),
        Err(e) => store_error(e),
    }
}

pub async fn add_faq(State(state): State<Arc<AppState>>, Json(mut faq): Json<Faq>) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    faq.id = generate_id();
    kb.faqs.push(faq.clone());
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(faq).into_response()
}

pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut faq): Json<Faq>,
) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    let Some(slot) = kb.faqs.iter_mut().find(|f| f.id == id) else {
        return not_found("FAQ");
    };
    faq.id = id;
    *slot = faq.clone();
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(faq).into_response()
}

pub async fn delete_faq(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    kb.faqs.retain(|f| f.id != id);
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(serde_json::json!({"message": "FAQ deleted"})).into_response()
}

// ─── Policies ──────────────────────────────────────────────

pub async fn list_policies(State(state): State<Arc<AppState>>) -> Response {
    match state.store.load() {
        Ok(kb) => Json(kb.policies).into_response(),
        Err(e) => store_error(e),
    }
}

pub async fn add_policy(
    State(state): State<Arc<AppState>>,
    Json(mut policy): Json<Policy>,
) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    policy.id = generate_id();
    kb.policies.push(policy.clone());
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(policy).into_response()
}

pub async fn update_policy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut policy): Json<Policy>,
) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    let Some(slot) = kb.policies.iter_mut().find(|p| p.id == id) else {
        return not_found("Policy");
    };
    policy.id = id;
    *slot = policy.clone();
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(policy).into_response()
}

pub async fn delete_policy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    kb.policies.retain(|p| p.id != id);
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(serde_json::json!({"message": "Policy deleted"})).into_response()
}

// ─── Custom knowledge ──────────────────────────────────────

pub async fn list_knowledge(State(state): State<Arc<AppState>>) -> Response {
    match state.store.load() {
        Ok(kb) => Json(kb.custom_knowledge).into_response(),
        Err(e) => store_error(e),
    }
}

pub async fn add_knowledge(
    State(state): State<Arc<AppState>>,
    Json(mut entry): Json<CustomEntry>,
) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    entry.id = generate_id();
    kb.custom_knowledge.push(entry.clone());
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(entry).into_response()
}

pub async fn update_knowledge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut entry): Json<CustomEntry>,
) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    let Some(slot) = kb.custom_knowledge.iter_mut().find(|k| k.id == id) else {
        return not_found("Knowledge entry");
    };
    entry.id = id;
    *slot = entry.clone();
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(entry).into_response()
}

pub async fn delete_knowledge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    kb.custom_knowledge.retain(|k| k.id != id);
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(serde_json::json!({"message": "Knowledge entry deleted"})).into_response()
}

// ─── Store info ────────────────────────────────────────────

pub async fn get_store_info(State(state): State<Arc<AppState>>) -> Response {
    match state.store.load() {
        Ok(kb) => Json(kb.store_info).into_response(),
        Err(e) => store_error(e),
    }
}

/// Partial update: only fields present in the body overwrite.
pub async fn update_store_info(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<StoreInfoPatch>,
) -> Response {
    let mut kb = match state.store.load() {
        Ok(kb) => kb,
        Err(e) => return store_error(e),
    };
    kb.store_info.apply(patch);
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(kb.store_info).into_response()
}

// ─── Export / Import ───────────────────────────────────────

pub async fn export_memory(State(state): State<Arc<AppState>>) -> Response {
    match state.store.load() {
        Ok(kb) => Json(kb).into_response(),
        Err(e) => store_error(e),
    }
}

pub async fn import_memory(
    State(state): State<Arc<AppState>>,
    Json(kb): Json<KnowledgeBase>,
) -> Response {
    if let Err(e) = state.store.save(&kb) {
        return store_error(e);
    }
    Json(serde_json::json!({"message": "Memory imported successfully"})).into_response()
}
