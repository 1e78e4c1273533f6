//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides a mock remote QA client, allowing the resolver and
//! the HTTP layer to be tested without a real inference endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use faqbot_core::testing::{fixtures, MockQaClient};
//!
//! let qa = Arc::new(MockQaClient::new());
//! qa.set_default_response(QueryResult::answered("maybe", 0.6)).await;
//!
//! let resolver = AnswerResolver::new(
//!     FaqMatcher::new(fixtures::faq_entries()),
//!     qa.clone(),
//!     &ResolverConfig::default(),
//! );
//! ```

mod mock_qa_client;

pub use mock_qa_client::{MockQaClient, RecordedQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::Config;
    use crate::faq::FaqEntry;

    /// A small shop-style FAQ corpus.
    pub fn faq_entries() -> Vec<FaqEntry> {
        vec![
            FaqEntry::new(
                "what are your opening hours",
                "We are open 9am to 5pm, Monday to Friday.",
            ),
            FaqEntry::new(
                "do you ship abroad",
                "We ship to most countries within 7 business days.",
            ),
            FaqEntry::new(
                "how do i reset my password",
                "Use the 'Forgot password' link on the login page.",
            ),
        ]
    }

    /// Default configuration bound to localhost, with the given FAQ corpus.
    pub fn config_with_faq(faq: Vec<FaqEntry>) -> Config {
        let mut config = Config::default();
        config.server.host = std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST);
        config.faq = faq;
        config
    }
}
