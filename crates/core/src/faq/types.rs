//! FAQ entry type and the built-in corpus.

use serde::{Deserialize, Serialize};

/// A static question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// The corpus used when the configuration does not provide one.
pub fn default_faq() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new("hello", "Hi there! How can I help you?"),
        FaqEntry::new("what is your name", "I'm a simple FAQ bot."),
        FaqEntry::new(
            "how does this work",
            "I use a Hugging Face language model to answer questions.",
        ),
    ]
}
