//! Typed records for the knowledge document.
//!
//! Every field is permissive on load: optional fields carry `#[serde(default)]`
//! so a partial or hand-edited document deserializes with documented defaults
//! instead of failing at each access site.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Root knowledge document. Insertion order of each list is preserved
/// across load/save.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub policies: Vec<Policy>,
    #[serde(default)]
    pub custom_knowledge: Vec<CustomEntry>,
    #[serde(default)]
    pub store_info: StoreInfo,
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    /// Non-negative decimal price.
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "bool_true")]
    pub in_stock: bool,
}

/// A frequently-asked question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default)]
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: String,
}

/// A store policy (shipping, returns, privacy, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type", default = "default_policy_kind")]
    pub kind: String,
}

fn default_policy_kind() -> String {
    "general".into()
}

/// A free-form knowledge entry with explicit match keywords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomEntry {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Singleton store identity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreInfo {
    #[serde(default = "default_store_name")]
    pub name: String,
    #[serde(default = "default_store_description")]
    pub description: String,
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
}

fn default_store_name() -> String {
    "My E-commerce Store".into()
}
fn default_store_description() -> String {
    "Welcome to our online store!".into()
}
fn default_contact_email() -> String {
    "support@store.com".into()
}
fn bool_true() -> bool {
    true
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            description: default_store_description(),
            contact_email: default_contact_email(),
            contact_phone: String::new(),
        }
    }
}

/// Partial store-info update: only `Some` fields overwrite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreInfoPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl StoreInfo {
    /// Merge a partial update field-by-field.
    pub fn apply(&mut self, patch: StoreInfoPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.contact_email {
            self.contact_email = v;
        }
        if let Some(v) = patch.contact_phone {
            self.contact_phone = v;
        }
    }
}

/// Transient matcher output — the matched subset of each category.
/// Never persisted.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    pub products: Vec<Product>,
    pub faqs: Vec<Faq>,
    pub policies: Vec<Policy>,
    pub custom_knowledge: Vec<CustomEntry>,
    pub store_info: Option<StoreInfo>,
}

/// Generate a unique entry id: UTC timestamp with sub-second precision.
/// Assigned once at creation and never reassigned on update.
pub fn generate_id() -> String {
    Utc::now().format("%Y%m%d%H%M%S%f").to_string()
}
