use crate::core::classifier::classify_query;
use crate::core::formatter::format_response;
use crate::core::memory::{ConversationMemory, DEFAULT_MAX_HISTORY};
use crate::domain::model::{AgentReply, Category, CompletionRequest, Topic};
use crate::domain::ports::{Agent, ChatModel};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

#[derive(Debug, Clone, PartialEq)]
pub struct TutorOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_history: usize,
}

impl Default for TutorOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

/// Tutoring agent for quantum computing questions.
pub struct QuantumTutorAgent {
    model: Arc<dyn ChatModel>,
    options: TutorOptions,
    memory: ConversationMemory,
    total_queries: u64,
}

impl QuantumTutorAgent {
    pub fn new(model: Arc<dyn ChatModel>, options: TutorOptions) -> Self {
        let memory = ConversationMemory::new(options.max_history);
        Self {
            model,
            options,
            memory,
            total_queries: 0,
        }
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Queries received since the agent was created, including failed ones.
    pub fn total_queries(&self) -> u64 {
        self.total_queries
    }

    pub fn classify_query(&self, message: &str) -> Category {
        classify_query(message, &self.memory)
    }

    pub fn build_contextual_prompt(&self, message: &str, category: Category) -> String {
        let context = self.memory.context_summary();
        let progress = self.memory.learning_progress();
        let progress = if progress.is_empty() {
            "New learner".to_string()
        } else {
            progress
                .iter()
                .map(|(category, count)| format!("{}: {}", category, count))
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!(
            "You are QuantumTutor 🤖, an expert quantum computing tutor. \
             CONVERSATION CONTEXT: {}. \
             CURRENT QUERY: '{}'. QUERY CATEGORY: {}. \
             LEARNING PROGRESS: {}. \
             Instructions: Be friendly, use simple analogies, and keep responses engaging and well-structured.",
            context, message, category, progress
        )
    }

    pub fn help_response(&self) -> String {
        "🤖 **QuantumTutor Capabilities**\n\nI can help you with:\n\
         • 💻 **Code**: Python/Qiskit examples\n\
         • 📚 **Research**: arXiv paper suggestions\n\
         • ⚖️ **Comparisons**: Classical vs. Quantum concepts\n\
         • 🌍 **Applications**: Real-world use cases\n\
         • 🎯 **Quizzes**: Test your knowledge\n\n\
         Try asking: *'Explain quantum superposition'* or *'Show me a simple Qiskit circuit'*."
            .to_string()
    }

    pub fn session_summary(&self) -> String {
        let progress = self.memory.learning_progress();
        if self.memory.is_empty() {
            return "🌟 Welcome! We haven't started our learning journey yet.".to_string();
        }

        // first category to reach the highest count
        let most_discussed = progress
            .iter()
            .fold(None::<&(Category, usize)>, |best, entry| match best {
                Some(b) if b.1 >= entry.1 => Some(b),
                _ => Some(entry),
            })
            .map(|(category, _)| category.to_string())
            .unwrap_or_else(|| "None".to_string());

        let topics: Vec<String> = progress.iter().map(|(c, _)| c.to_string()).collect();

        format!(
            "📊 **Session Summary**\n\
             • **Total questions asked**: {}\n\
             • **Topics explored**: {}\n\
             • **Most discussed topic**: {}",
            self.memory.len(),
            topics.join(", "),
            most_discussed
        )
    }

    pub fn reset_conversation(&mut self) {
        self.memory = ConversationMemory::new(self.options.max_history);
        tracing::info!("🔄 Conversation reset");
    }

    async fn answer(&self, message: &str, category: Category) -> Result<String> {
        match category {
            Category::Topic(Topic::Help) => Ok(self.help_response()),
            Category::Topic(Topic::Progress) => Ok(self.session_summary()),
            _ => {
                let request = CompletionRequest {
                    model: self.options.model.clone(),
                    prompt: self.build_contextual_prompt(message, category),
                    temperature: self.options.temperature,
                    max_tokens: self.options.max_tokens,
                };
                tracing::debug!("Requesting completion for category {}", category);
                self.model.complete(&request).await
            }
        }
    }
}

#[async_trait]
impl Agent for QuantumTutorAgent {
    async fn run(&mut self, message: &str) -> AgentReply {
        let start = Instant::now();
        self.total_queries += 1;
        let category = self.classify_query(message);

        match self.answer(message, category).await {
            Ok(content) => {
                let formatted = format_response(&content);
                let mut metadata = serde_json::Map::new();
                metadata.insert(
                    "response_time".to_string(),
                    serde_json::json!(start.elapsed().as_secs_f64()),
                );
                self.memory
                    .add_interaction(message, &formatted, category, metadata);

                AgentReply {
                    response: formatted,
                    category,
                    conversation_length: Some(self.memory.len()),
                }
            }
            Err(e) => {
                tracing::warn!("❌ Tutor query failed: {} (Category: {:?})", e, e.category());
                AgentReply {
                    response: format!("🔧 Oops! An error occurred: {}", e),
                    category: Category::Error,
                    conversation_length: None,
                }
            }
        }
    }
}
