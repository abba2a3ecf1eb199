use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Subject area a learner's question falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Code,
    Research,
    Comparison,
    Math,
    Application,
    History,
    Fun,
    Quiz,
    Help,
    Progress,
    General,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Code => "code",
            Topic::Research => "research",
            Topic::Comparison => "comparison",
            Topic::Math => "math",
            Topic::Application => "application",
            Topic::History => "history",
            Topic::Fun => "fun",
            Topic::Quiz => "quiz",
            Topic::Help => "help",
            Topic::Progress => "progress",
            Topic::General => "general",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification attached to every agent reply.
///
/// Renders as `code`, `followup_code`, `followup_followup_code` or `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Topic(Topic),
    /// `depth` is at least 1: one `followup_` prefix per level.
    FollowUp { topic: Topic, depth: u32 },
    Error,
}

impl Category {
    /// The underlying subject, if the reply was not an error.
    pub fn topic(&self) -> Option<Topic> {
        match self {
            Category::Topic(t) | Category::FollowUp { topic: t, .. } => Some(*t),
            Category::Error => None,
        }
    }

    /// This category wrapped in one more follow-up level.
    pub fn follow_up(&self) -> Option<Category> {
        match *self {
            Category::Topic(topic) => Some(Category::FollowUp { topic, depth: 1 }),
            Category::FollowUp { topic, depth } => Some(Category::FollowUp {
                topic,
                depth: depth.saturating_add(1),
            }),
            Category::Error => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Topic(t) => write!(f, "{}", t),
            Category::FollowUp { topic, depth } => {
                for _ in 0..*depth {
                    f.write_str("followup_")?;
                }
                write!(f, "{}", topic)
            }
            Category::Error => f.write_str("error"),
        }
    }
}

impl From<Topic> for Category {
    fn from(topic: Topic) -> Self {
        Category::Topic(topic)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Interaction {
    pub timestamp: DateTime<Utc>,
    pub user_message: String,
    pub bot_response: String,
    pub category: Category,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReply {
    pub response: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_length: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}
