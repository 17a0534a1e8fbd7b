//! Query normalization and the fixed keyword sets driving the matcher.
//!
//! The sets are named constants (not inline literals) so tests can assert
//! membership directly.

use std::collections::HashSet;

/// Common words stripped from queries before matching.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "do", "does", "what", "how", "can", "i", "you", "your", "my",
    "me", "we", "us", "to", "for", "of", "in", "on", "at", "with", "have", "has", "any", "some",
    "all", "this", "that", "these", "those",
];

/// Salutations — trigger the store-info match and the canned welcome.
pub const GREETING_WORDS: &[&str] = &[
    "hi", "hello", "hey", "greetings", "good", "morning", "afternoon", "evening",
];

/// Words signalling a question about the store itself.
pub const STORE_KEYWORDS: &[&str] = &[
    "store", "shop", "about", "contact", "email", "phone", "who", "company",
];

/// Words signalling a product/catalog question.
pub const PRODUCT_QUERY_KEYWORDS: &[&str] = &[
    "product", "products", "item", "items", "buy", "sell", "selling", "offer", "catalog",
    "catalogue", "inventory", "merchandise",
];

/// Price questions match every product unconditionally.
pub const PRICE_KEYWORDS: &[&str] = &["price", "cost", "much", "expensive", "cheap"];

/// Support topics that pull in FAQs even without a direct text overlap.
pub const FAQ_KEYWORDS: &[&str] = &[
    "shipping", "ship", "delivery", "deliver", "return", "refund", "exchange", "warranty",
    "guarantee", "payment", "pay", "order", "track", "tracking",
];

/// Support topics that pull in policies.
pub const POLICY_KEYWORDS: &[&str] = &[
    "shipping", "return", "refund", "policy", "policies", "delivery", "exchange", "warranty",
    "guarantee", "terms", "privacy",
];

/// A query containing any of these is never treated as a pure greeting.
pub const NON_GREETING_KEYWORDS: &[&str] = &[
    "shipping", "return", "product", "price", "policy", "order", "buy", "help", "support",
];

/// Normalized query: lowercased, punctuation stripped, tokenized into sets.
#[derive(Debug, Clone, Default)]
pub struct QueryTerms {
    /// Every distinct token of the cleaned query.
    pub all: HashSet<String>,
    /// Tokens remaining after stop-word removal.
    pub meaningful: HashSet<String>,
}

impl QueryTerms {
    /// Normalize free text into word sets. Empty input yields empty sets.
    pub fn parse(text: &str) -> Self {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();
        let all: HashSet<String> = cleaned.split_whitespace().map(str::to_string).collect();
        let meaningful = all
            .iter()
            .filter(|w| !STOP_WORDS.contains(&w.as_str()))
            .cloned()
            .collect();
        Self { all, meaningful }
    }

    /// True if any query token appears in the given keyword set.
    pub fn intersects(&self, keywords: &[&str]) -> bool {
        self.all.iter().any(|w| keywords.contains(&w.as_str()))
    }

    /// The query tokens that appear in the given keyword set.
    pub fn intersection<'a>(&'a self, keywords: &[&str]) -> Vec<&'a str> {
        self.all
            .iter()
            .filter(|w| keywords.contains(&w.as_str()))
            .map(String::as_str)
            .collect()
    }
}
