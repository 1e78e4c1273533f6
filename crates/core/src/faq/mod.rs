//! FAQ corpus and exact-match lookup.

mod matcher;
mod types;

pub use matcher::{normalize, FaqMatcher};
pub use types::{default_faq, FaqEntry};
