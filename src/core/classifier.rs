use crate::core::memory::ConversationMemory;
use crate::domain::model::{Category, Topic};

/// Keyword rules, checked in order; the first topic with a matching keyword wins.
const RULES: &[(Topic, &[&str])] = &[
    (Topic::Code, &["code", "python", "program", "qiskit"]),
    (Topic::Research, &["arxiv", "paper", "research"]),
    (Topic::Comparison, &["difference", "vs", "compare"]),
    (Topic::Math, &["formula", "equation", "math"]),
    (Topic::Application, &["application", "real world", "use case"]),
    (Topic::History, &["history", "who discovered"]),
    (Topic::Fun, &["fun fact", "joke", "trivia"]),
    (Topic::Quiz, &["mcq", "quiz", "test"]),
    (Topic::Help, &["help", "what can you do"]),
    (Topic::Progress, &["progress", "summary"]),
];

pub fn classify_query(message: &str, memory: &ConversationMemory) -> Category {
    if memory.is_follow_up_question(message) {
        if let Some(category) = memory.last().and_then(|last| last.category.follow_up()) {
            return category;
        }
    }

    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|key| lowered.contains(key)))
        .map(|(topic, _)| Category::Topic(*topic))
        .unwrap_or(Category::Topic(Topic::General))
}
