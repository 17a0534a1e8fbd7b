//! Knowledge document persistence — lightweight flat-file store.
//!
//! The whole knowledge base lives in one JSON file (human-readable,
//! git-friendly). The store trait lets tests substitute an in-memory
//! document for the file.

use crate::model::KnowledgeBase;
use shopclaw_core::{Result, ShopClawError};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Load/save boundary for the knowledge document.
///
/// Implementations are permissive on load: a missing or unreadable document
/// yields the default knowledge base, never an access-site failure.
pub trait KnowledgeStore: Send + Sync {
    /// Load the current document (or the documented default).
    fn load(&self) -> Result<KnowledgeBase>;
    /// Persist the whole document (last write wins).
    fn save(&self, kb: &KnowledgeBase) -> Result<()>;
}

/// File-backed store: one pretty-printed JSON document per data directory.
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles so concurrent CRUD requests
    /// cannot interleave and drop writes.
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store rooted at the given data directory.
    pub fn new(dir: &Path) -> Self {
        std::fs::create_dir_all(dir).ok();
        Self {
            path: dir.join("memory.json"),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KnowledgeStore for FileStore {
    fn load(&self) -> Result<KnowledgeBase> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        if !self.path.exists() {
            return Ok(KnowledgeBase::default());
        }
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("⚠️ Failed to parse {}: {e}", self.path.display());
                KnowledgeBase::default()
            })),
            Err(e) => {
                tracing::warn!("⚠️ Failed to read {}: {e}", self.path.display());
                Ok(KnowledgeBase::default())
            }
        }
    }

    fn save(&self, kb: &KnowledgeBase) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let json = serde_json::to_string_pretty(kb)
            .map_err(|e| ShopClawError::Store(format!("Serialize error: {e}")))?;
        std::fs::write(&self.path, &json)
            .map_err(|e| ShopClawError::Store(format!("Write error: {e}")))?;
        tracing::debug!(
            "💾 Saved knowledge base ({} products, {} faqs) to {}",
            kb.products.len(),
            kb.faqs.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemStore {
    kb: Mutex<KnowledgeBase>,
}

impl MemStore {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self { kb: Mutex::new(kb) }
    }
}

impl KnowledgeStore for MemStore {
    fn load(&self) -> Result<KnowledgeBase> {
        Ok(self.kb.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, kb: &KnowledgeBase) -> Result<()> {
        *self.kb.lock().unwrap_or_else(|e| e.into_inner()) = kb.clone();
        Ok(())
    }
}
