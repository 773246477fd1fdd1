// src/router.rs

use crate::models::ChatTarget;

/// Phrases that send a message to the project/tech-spec assistant.
pub const TRIGGER_KEYWORDS: [&str; 4] = [
    "new project",
    "application",
    "tech spec",
    "technical specification",
];

/// Picks the backend for an outgoing message.
///
/// The keyword matcher below is a stand-in; an intent model can replace it
/// without touching the send pipeline in [`crate::chat`].
pub trait MessageClassifier: Send + Sync {
    fn classify(&self, text: &str) -> ChatTarget;
}

/// Case-insensitive substring match against a fixed keyword list.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    keywords: Vec<String>,
}

impl KeywordClassifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(TRIGGER_KEYWORDS)
    }
}

impl MessageClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> ChatTarget {
        let lowered = text.to_lowercase();
        if self.keywords.iter().any(|k| lowered.contains(k.as_str())) {
            ChatTarget::A
        } else {
            ChatTarget::B
        }
    }
}

/// Routes with the default keyword set.
pub fn classify(text: &str) -> ChatTarget {
    KeywordClassifier::default().classify(text)
}
