//! # ShopClaw Gateway
//! HTTP API for the support chatbot: chat endpoint + knowledge CRUD.

pub mod routes;
pub mod server;

pub use server::{AppState, build_router, start};
