//! Response composer: assembles the chat reply from matcher output.
//!
//! Deterministic section order: greeting > products > FAQs > policies >
//! custom knowledge > store info > fallback. Truncation limits are fixed
//! policy, not configuration.

use crate::model::{KnowledgeBase, MatchResult};
use crate::query::{GREETING_WORDS, NON_GREETING_KEYWORDS, QueryTerms};

const MAX_PRODUCTS: usize = 5;
const MAX_FAQS: usize = 3;
const MAX_POLICIES: usize = 2;
const MAX_CUSTOM: usize = 2;

const SECTION_SEPARATOR: &str = "\n---\n";

fn store_name(kb: &KnowledgeBase) -> &str {
    if kb.store_info.name.is_empty() {
        "our store"
    } else {
        &kb.store_info.name
    }
}

fn contact_email(kb: &KnowledgeBase) -> &str {
    if kb.store_info.contact_email.is_empty() {
        "support@store.com"
    } else {
        &kb.store_info.contact_email
    }
}

/// A query is a pure greeting when it carries a greeting word and no
/// support-topic signal; it short-circuits every other section.
fn is_pure_greeting(terms: &QueryTerms) -> bool {
    terms.intersects(GREETING_WORDS) && !terms.intersects(NON_GREETING_KEYWORDS)
}

fn greeting(kb: &KnowledgeBase) -> String {
    [
        format!(
            "Hello! Welcome to {}! 👋 How can I help you today? I can assist you with:",
            store_name(kb)
        ),
        "• Product information and recommendations".into(),
        "• Pricing and availability".into(),
        "• Shipping and return policies".into(),
        "• General questions about our store".into(),
    ]
    .join("\n")
}

fn push_products(parts: &mut Vec<String>, matches: &MatchResult) {
    if matches.products.is_empty() {
        return;
    }
    if let [p] = matches.products.as_slice() {
        // Single hit: detailed product card.
        parts.push(format!("**{}**", p.name));
        parts.push(format!("📝 {}", p.description));
        parts.push(format!("💰 Price: R{:.2}", p.price));
        if !p.category.is_empty() {
            parts.push(format!("📁 Category: {}", p.category));
        }
        if !p.features.is_empty() {
            parts.push("✨ Features:".into());
            for feature in &p.features {
                parts.push(format!("  • {feature}"));
            }
        }
        parts.push(if p.in_stock {
            "✅ In Stock".into()
        } else {
            "❌ Out of Stock".into()
        });
    } else {
        parts.push("Here are some products that might interest you:".into());
        for p in matches.products.iter().take(MAX_PRODUCTS) {
            let stock = if p.in_stock { "✅" } else { "❌" };
            parts.push(format!("• **{}** - R{:.2} {}", p.name, p.price, stock));
        }
    }
}

/// Compose the final reply from (query, matches, document).
pub fn compose(terms: &QueryTerms, matches: &MatchResult, kb: &KnowledgeBase) -> String {
    if is_pure_greeting(terms) {
        return greeting(kb);
    }

    let mut parts: Vec<String> = Vec::new();

    push_products(&mut parts, matches);

    if !matches.faqs.is_empty() {
        if !parts.is_empty() {
            parts.push(SECTION_SEPARATOR.into());
        }
        for faq in matches.faqs.iter().take(MAX_FAQS) {
            parts.push(format!("**Q: {}**", faq.question));
            parts.push(format!("A: {}", faq.answer));
        }
    }

    if !matches.policies.is_empty() {
        if !parts.is_empty() {
            parts.push(SECTION_SEPARATOR.into());
        }
        for policy in matches.policies.iter().take(MAX_POLICIES) {
            parts.push(format!("**{}**", policy.title));
            parts.push(policy.content.clone());
        }
    }

    if !matches.custom_knowledge.is_empty() {
        if !parts.is_empty() {
            parts.push(SECTION_SEPARATOR.into());
        }
        for entry in matches.custom_knowledge.iter().take(MAX_CUSTOM) {
            parts.push(format!("**{}**", entry.title));
            parts.push(entry.content.clone());
        }
    }

    // Store info only stands in when no other section produced output.
    if parts.is_empty() {
        if let Some(info) = &matches.store_info {
            parts.push(format!(
                "**{}**",
                if info.name.is_empty() { "Our Store" } else { &info.name }
            ));
            if !info.description.is_empty() {
                parts.push(info.description.clone());
            }
            if !info.contact_email.is_empty() {
                parts.push(format!("📧 Email: {}", info.contact_email));
            }
            if !info.contact_phone.is_empty() {
                parts.push(format!("📞 Phone: {}", info.contact_phone));
            }
        }
    }

    if parts.is_empty() {
        parts.push(
            "I'm sorry, I couldn't find specific information about that in my knowledge base."
                .into(),
        );
        parts.push("Here's what I can help you with:".into());
        parts.push("• Product information and pricing".into());
        parts.push("• Shipping and delivery questions".into());
        parts.push("• Return and refund policies".into());
        parts.push("• General store inquiries".into());
        parts.push(format!(
            "\nFor more specific questions, please contact us at {}",
            contact_email(kb)
        ));
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer;
    use crate::model::{Faq, Policy, Product, StoreInfo};

    fn kb_named(name: &str) -> KnowledgeBase {
        KnowledgeBase {
            store_info: StoreInfo {
                name: name.into(),
                ..StoreInfo::default()
            },
            ..KnowledgeBase::default()
        }
    }

    fn product(name: &str, price: f64) -> Product {
        Product {
            id: String::new(),
            name: name.into(),
            description: format!("{name} description"),
            price,
            category: String::new(),
            features: vec![],
            in_stock: true,
        }
    }

    #[test]
    fn test_pure_greeting_names_store_with_four_bullets() {
        let reply = answer("hi", &kb_named("Acme"));
        assert!(reply.contains("Acme"));
        let bullets = reply.lines().filter(|l| l.starts_with("• ")).count();
        assert_eq!(bullets, 4);
    }

    #[test]
    fn test_greeting_with_topic_word_is_not_pure() {
        let mut kb = kb_named("Acme");
        kb.policies.push(Policy {
            id: String::new(),
            title: "Return Policy".into(),
            content: "Returns accepted within 30 days.".into(),
            kind: "returns".into(),
        });
        let reply = answer("hi, what's your return policy?", &kb);
        assert!(!reply.contains("How can I help you today?"));
        assert!(reply.contains("Return Policy"));
    }

    #[test]
    fn test_three_products_render_as_bulleted_list() {
        let mut kb = KnowledgeBase::default();
        kb.products = vec![
            product("Alpha", 10.0),
            product("Beta", 20.0),
            product("Gamma", 30.0),
        ];
        let reply = answer("products", &kb);
        assert!(reply.contains("Here are some products that might interest you:"));
        assert!(reply.contains("• **Alpha** - R10.00 ✅"));
        assert!(reply.contains("• **Beta** - R20.00 ✅"));
        assert!(reply.contains("• **Gamma** - R30.00 ✅"));
    }

    #[test]
    fn test_single_product_card_formats_price_to_two_decimals() {
        let mut kb = KnowledgeBase::default();
        kb.products = vec![Product {
            features: vec!["Bluetooth 5.0".into()],
            category: "audio".into(),
            ..product("Widget", 199.9)
        }];
        let reply = answer("widget", &kb);
        assert!(reply.contains("**Widget**"));
        assert!(reply.contains("💰 Price: R199.90"));
        assert!(reply.contains("📁 Category: audio"));
        assert!(reply.contains("  • Bluetooth 5.0"));
        assert!(reply.contains("✅ In Stock"));
    }

    #[test]
    fn test_out_of_stock_flag() {
        let mut kb = KnowledgeBase::default();
        kb.products = vec![Product {
            in_stock: false,
            ..product("Widget", 5.0)
        }];
        let reply = answer("widget", &kb);
        assert!(reply.contains("❌ Out of Stock"));
    }

    #[test]
    fn test_product_list_truncates_to_five() {
        let mut kb = KnowledgeBase::default();
        kb.products = (0..10).map(|i| product(&format!("P{i}"), 1.0)).collect();
        let reply = answer("products", &kb);
        let bullets = reply.lines().filter(|l| l.starts_with("• **")).count();
        assert_eq!(bullets, 5);
    }

    #[test]
    fn test_faqs_truncate_to_three() {
        let mut kb = KnowledgeBase::default();
        kb.faqs = (0..10)
            .map(|i| Faq {
                id: String::new(),
                question: format!("Question about shipping {i}?"),
                answer: "Yes.".into(),
                category: String::new(),
            })
            .collect();
        let reply = answer("shipping", &kb);
        let questions = reply.lines().filter(|l| l.starts_with("**Q:")).count();
        assert_eq!(questions, 3);
    }

    #[test]
    fn test_empty_base_greeting_and_fallback() {
        let kb = KnowledgeBase::default();
        let reply = answer("hello", &kb);
        assert!(reply.contains("How can I help you today?"));

        let reply = answer("xyz123nonsense", &kb);
        assert!(reply.contains("couldn't find specific information"));
        assert!(reply.contains("support@store.com"));
    }

    #[test]
    fn test_store_question_renders_store_info() {
        let kb = kb_named("Acme");
        let reply = answer("tell me about the store", &kb);
        assert!(reply.contains("**Acme**"));
        assert!(reply.contains("📧 Email: support@store.com"));
        // Empty phone is skipped entirely.
        assert!(!reply.contains("📞"));
    }

    #[test]
    fn test_separator_between_sections() {
        let mut kb = KnowledgeBase::default();
        kb.products = vec![product("Shipping Scale", 50.0)];
        kb.faqs = vec![Faq {
            id: String::new(),
            question: "How long does shipping take?".into(),
            answer: "3-5 days.".into(),
            category: String::new(),
        }];
        let reply = answer("shipping", &kb);
        assert!(reply.contains("---"));
        let product_pos = reply.find("**Shipping Scale**").unwrap();
        let faq_pos = reply.find("**Q:").unwrap();
        assert!(product_pos < faq_pos);
    }
}
