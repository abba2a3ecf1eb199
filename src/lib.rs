pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use crate::adapters::groq::{GroqClient, GroqSettings};
pub use crate::config::{AppConfig, CliConfig};
pub use crate::core::tutor::{QuantumTutorAgent, TutorOptions};
pub use crate::server::{router, serve, AppState};
pub use crate::utils::error::{Result, TutorError};
