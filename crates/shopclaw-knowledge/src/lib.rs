//! # ShopClaw Knowledge Base
//!
//! Flat-file knowledge base + deterministic chat engine.
//! No vector DB, no embeddings, no external AI calls — pure keyword matching.
//!
//! ## How it works
//! ```text
//! User: "do you sell wireless headphones?"
//!   ↓
//! QueryTerms::parse — lowercase, strip punctuation, drop stop words
//!   ↓
//! matcher::search — scan products / FAQs / policies / custom entries
//!   ↓
//! composer::compose — prioritized text reply (greeting > products > FAQs > …)
//! ```
//!
//! The whole pipeline is a pure function of (query, document): no state is
//! retained between calls and the document is never mutated.

pub mod composer;
pub mod matcher;
pub mod model;
pub mod query;
pub mod store;

pub use model::{CustomEntry, Faq, KnowledgeBase, MatchResult, Policy, Product, StoreInfo};
pub use query::QueryTerms;
pub use store::{FileStore, KnowledgeStore, MemStore};

/// Answer a free-text chat query against a knowledge document.
///
/// Single entry point combining normalize → match → compose.
pub fn answer(query: &str, kb: &KnowledgeBase) -> String {
    let terms = QueryTerms::parse(query);
    let matches = matcher::search(&terms, kb);
    composer::compose(&terms, &matches, kb)
}
