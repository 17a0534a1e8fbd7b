//! Keyword matcher: scans each knowledge category for entries relevant to a
//! normalized query.
//!
//! Matching is word-level substring containment against an entry's lowercased
//! "searchable text" — intentionally loose, so "ship" matches "shipping".
//! The category rules are independent and cumulative.

use crate::model::{CustomEntry, Faq, KnowledgeBase, MatchResult, Policy, Product};
use crate::query::{
    FAQ_KEYWORDS, GREETING_WORDS, POLICY_KEYWORDS, PRICE_KEYWORDS, PRODUCT_QUERY_KEYWORDS,
    QueryTerms, STORE_KEYWORDS,
};

/// True if any of `words` is a substring of `text`.
fn any_word_in<'a, I>(words: I, text: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    words.into_iter().any(|w| text.contains(w))
}

fn product_text(p: &Product) -> String {
    format!(
        "{} {} {} {}",
        p.name,
        p.description,
        p.category,
        p.features.join(" ")
    )
    .to_lowercase()
}

fn faq_text(f: &Faq) -> String {
    format!("{} {} {}", f.question, f.answer, f.category).to_lowercase()
}

fn policy_text(p: &Policy) -> String {
    format!("{} {} {}", p.title, p.content, p.kind).to_lowercase()
}

fn custom_text(e: &CustomEntry) -> String {
    format!("{} {} {}", e.title, e.content, e.keywords.join(" ")).to_lowercase()
}

fn match_products(terms: &QueryTerms, products: &[Product]) -> Vec<Product> {
    if terms.intersects(PRODUCT_QUERY_KEYWORDS) {
        // General catalog intent ("show me products") returns everything
        // unless the query carries more specific terms.
        let specific: Vec<&str> = terms
            .meaningful
            .iter()
            .filter(|w| !PRODUCT_QUERY_KEYWORDS.contains(&w.as_str()))
            .map(String::as_str)
            .collect();
        if specific.is_empty() {
            return products.to_vec();
        }
        return products
            .iter()
            .filter(|p| any_word_in(specific.iter().copied(), &product_text(p)))
            .cloned()
            .collect();
    }

    let is_price_query = terms.intersects(PRICE_KEYWORDS);
    products
        .iter()
        .filter(|p| {
            let text = product_text(p);
            if !terms.meaningful.is_empty()
                && any_word_in(terms.meaningful.iter().map(String::as_str), &text)
            {
                true
            } else {
                // Price questions match every product unconditionally.
                is_price_query
            }
        })
        .cloned()
        .collect()
}

fn match_faqs(terms: &QueryTerms, faqs: &[Faq]) -> Vec<Faq> {
    let topic_hits = terms.intersection(FAQ_KEYWORDS);
    faqs.iter()
        .filter(|f| {
            let text = faq_text(f);
            if !terms.meaningful.is_empty()
                && any_word_in(terms.meaningful.iter().map(String::as_str), &text)
            {
                true
            } else {
                any_word_in(topic_hits.iter().copied(), &text)
            }
        })
        .cloned()
        .collect()
}

fn match_policies(terms: &QueryTerms, policies: &[Policy]) -> Vec<Policy> {
    let topic_hits = terms.intersection(POLICY_KEYWORDS);
    policies
        .iter()
        .filter(|p| {
            let text = policy_text(p);
            if !terms.meaningful.is_empty()
                && any_word_in(terms.meaningful.iter().map(String::as_str), &text)
            {
                true
            } else {
                any_word_in(topic_hits.iter().copied(), &text)
            }
        })
        .cloned()
        .collect()
}

fn match_custom(terms: &QueryTerms, entries: &[CustomEntry]) -> Vec<CustomEntry> {
    if terms.meaningful.is_empty() {
        return Vec::new();
    }
    entries
        .iter()
        .filter(|e| any_word_in(terms.meaningful.iter().map(String::as_str), &custom_text(e)))
        .cloned()
        .collect()
}

/// Scan the whole knowledge document for entries relevant to the query.
pub fn search(terms: &QueryTerms, kb: &KnowledgeBase) -> MatchResult {
    let store_info = if terms.intersects(STORE_KEYWORDS) || terms.intersects(GREETING_WORDS) {
        Some(kb.store_info.clone())
    } else {
        None
    };

    MatchResult {
        products: match_products(terms, &kb.products),
        faqs: match_faqs(terms, &kb.faqs),
        policies: match_policies(terms, &kb.policies),
        custom_knowledge: match_custom(terms, &kb.custom_knowledge),
        store_info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StoreInfo;

    fn product(name: &str, description: &str, category: &str) -> Product {
        Product {
            id: String::new(),
            name: name.into(),
            description: description.into(),
            price: 10.0,
            category: category.into(),
            features: vec![],
            in_stock: true,
        }
    }

    fn sample_kb() -> KnowledgeBase {
        KnowledgeBase {
            products: vec![
                product("Wireless Headphones", "Bluetooth over-ear headphones", "audio"),
                product("USB Cable", "2m braided charging cable", "accessories"),
                product("Desk Lamp", "LED lamp with dimmer", "home"),
            ],
            faqs: vec![
                Faq {
                    id: String::new(),
                    question: "How long does shipping take?".into(),
                    answer: "3-5 business days.".into(),
                    category: "shipping".into(),
                },
                Faq {
                    id: String::new(),
                    question: "Which colours are available?".into(),
                    answer: "Black and silver.".into(),
                    category: String::new(),
                },
            ],
            policies: vec![Policy {
                id: String::new(),
                title: "Return Policy".into(),
                content: "Returns accepted within 30 days.".into(),
                kind: "returns".into(),
            }],
            custom_knowledge: vec![CustomEntry {
                id: String::new(),
                title: "Gift wrapping".into(),
                content: "Available at checkout for R20.".into(),
                keywords: vec!["gift".into(), "wrapping".into()],
            }],
            store_info: StoreInfo::default(),
        }
    }

    #[test]
    fn test_general_product_query_returns_all() {
        let kb = sample_kb();
        let result = search(&QueryTerms::parse("what products do you have"), &kb);
        assert_eq!(result.products.len(), 3);
    }

    #[test]
    fn test_product_query_with_specific_terms_filters() {
        let kb = sample_kb();
        let result = search(&QueryTerms::parse("do you sell headphones"), &kb);
        assert_eq!(result.products.len(), 1);
        assert_eq!(result.products[0].name, "Wireless Headphones");
    }

    #[test]
    fn test_price_query_matches_every_product() {
        let kb = sample_kb();
        let result = search(&QueryTerms::parse("how much does it cost"), &kb);
        assert_eq!(result.products.len(), 3);
    }

    #[test]
    fn test_partial_word_matches_searchable_text() {
        let kb = sample_kb();
        // "lamp" is a substring of "LED lamp with dimmer"
        let result = search(&QueryTerms::parse("lamp"), &kb);
        assert_eq!(result.products.len(), 1);
        assert_eq!(result.products[0].name, "Desk Lamp");
    }

    #[test]
    fn test_faq_topic_keyword_requires_text_overlap() {
        let kb = sample_kb();
        let result = search(&QueryTerms::parse("how do i track my order"), &kb);
        // "track"/"order" are FAQ keywords but appear in neither FAQ text.
        assert!(result.faqs.is_empty());

        let result = search(&QueryTerms::parse("do you ship to me"), &kb);
        // "ship" is a substring of "shipping" in the first FAQ.
        assert_eq!(result.faqs.len(), 1);
        assert!(result.faqs[0].question.contains("shipping"));
    }

    #[test]
    fn test_policy_keyword_match() {
        let kb = sample_kb();
        let result = search(&QueryTerms::parse("what is your return policy"), &kb);
        assert_eq!(result.policies.len(), 1);
        assert_eq!(result.policies[0].title, "Return Policy");
    }

    #[test]
    fn test_custom_entry_matches_on_keywords() {
        let kb = sample_kb();
        let result = search(&QueryTerms::parse("can you gift wrap it"), &kb);
        assert_eq!(result.custom_knowledge.len(), 1);
        assert_eq!(result.custom_knowledge[0].title, "Gift wrapping");
    }

    #[test]
    fn test_greeting_pulls_store_info() {
        let kb = sample_kb();
        assert!(search(&QueryTerms::parse("hello"), &kb).store_info.is_some());
        assert!(search(&QueryTerms::parse("who are you"), &kb).store_info.is_some());
        assert!(search(&QueryTerms::parse("lamp"), &kb).store_info.is_none());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let kb = sample_kb();
        let result = search(&QueryTerms::parse(""), &kb);
        assert!(result.products.is_empty());
        assert!(result.faqs.is_empty());
        assert!(result.policies.is_empty());
        assert!(result.custom_knowledge.is_empty());
        assert!(result.store_info.is_none());
    }
}
