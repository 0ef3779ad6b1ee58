//! Decision provider implementations.

pub mod heuristic;
pub mod llm;
pub mod prompt;
pub mod webhook;

pub use heuristic::HeuristicProvider;
pub use llm::{LlmConfig, LlmProvider};
pub use webhook::WebhookProvider;
