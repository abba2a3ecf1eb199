use crate::domain::model::{Category, Interaction};
use chrono::Utc;

pub const DEFAULT_MAX_HISTORY: usize = 10;

const CONTEXT_WINDOW: usize = 3;
const CONTEXT_PREVIEW_CHARS: usize = 50;

const FOLLOW_UP_INDICATORS: &[&str] = &[
    "explain more",
    "tell me more",
    "what about",
    "how about",
    "also",
    "why",
    "how",
];

/// Bounded conversation history for a single learner session.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    history: Vec<Interaction>,
    max_history: usize,
}

impl ConversationMemory {
    pub fn new(max_history: usize) -> Self {
        Self {
            history: Vec::new(),
            max_history,
        }
    }

    pub fn add_interaction(
        &mut self,
        user_message: &str,
        bot_response: &str,
        category: Category,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) {
        self.history.push(Interaction {
            timestamp: Utc::now(),
            user_message: user_message.to_string(),
            bot_response: bot_response.to_string(),
            category,
            metadata,
        });

        if self.history.len() > self.max_history {
            let excess = self.history.len() - self.max_history;
            self.history.drain(..excess);
        }
    }

    pub fn history(&self) -> &[Interaction] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn last(&self) -> Option<&Interaction> {
        self.history.last()
    }

    pub fn context_summary(&self) -> String {
        if self.history.is_empty() {
            return "This is the start of our conversation.".to_string();
        }

        let start = self.history.len().saturating_sub(CONTEXT_WINDOW);
        let recent_topics: Vec<String> = self.history[start..]
            .iter()
            .map(|i| {
                let preview: String = i.user_message.chars().take(CONTEXT_PREVIEW_CHARS).collect();
                format!("({}): {}...", i.category, preview)
            })
            .collect();

        format!("Recent conversation context: {}", recent_topics.join("; "))
    }

    /// Interaction counts per category, ordered by first appearance.
    pub fn learning_progress(&self) -> Vec<(Category, usize)> {
        let mut progress: Vec<(Category, usize)> = Vec::new();
        for interaction in &self.history {
            match progress.iter_mut().find(|(c, _)| *c == interaction.category) {
                Some((_, count)) => *count += 1,
                None => progress.push((interaction.category, 1)),
            }
        }
        progress
    }

    pub fn is_follow_up_question(&self, message: &str) -> bool {
        let lowered = message.to_lowercase();
        FOLLOW_UP_INDICATORS
            .iter()
            .any(|indicator| lowered.contains(indicator))
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}
