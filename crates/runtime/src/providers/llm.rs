//! Language-model decision provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use arena_engine::TurnAction;

use super::prompt::{parse_reply, render_prompt};
use crate::error::ProviderError;
use crate::provider::{Decision, DecisionProvider};
use crate::view::TurnView;

/// Connection settings for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.9,
            max_tokens: 300,
        }
    }
}

/// Asks a chat model for the turn's move and parses its free-form reply.
///
/// Malformed replies never fail the turn: whatever token the parser can
/// salvage is played, and with nothing recognizable the first attack is the
/// safe default. Only transport-level problems surface as errors (and those
/// become fallback moves upstream).
pub struct LlmProvider {
    client: reqwest::Client,
    config: LlmConfig,
    personality: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl LlmProvider {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            personality: String::new(),
        }
    }

    /// Team flavor woven into the prompt so replies stay in character.
    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = personality.into();
        self
    }
}

#[async_trait]
impl DecisionProvider for LlmProvider {
    async fn decide(&self, view: &TurnView) -> Result<Decision, ProviderError> {
        let prompt = render_prompt(view, &self.personality);
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a team coach in a creature battle arena. \
                              Follow the response format exactly."
                        .to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(url)
            .timeout(Duration::from_millis(view.deadline_ms))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::BadStatus {
                status: status.as_u16(),
            });
        }

        let completion: ChatCompletion =
            response.json().await.map_err(ProviderError::Transport)?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::Completion {
                reason: "reply contained no choices".to_string(),
            })?;

        let parsed = parse_reply(&text);
        let action = match parsed.action {
            Some(action) => action,
            None => {
                tracing::warn!(
                    match_id = %view.match_id,
                    turn = view.turn,
                    "model reply contained no action token, defaulting to first attack"
                );
                TurnAction::Attack { index: 0 }
            }
        };

        Ok(Decision {
            token: parsed.token.unwrap_or_else(|| action.token()),
            action,
            thinking: parsed.thinking,
            taunt: parsed.taunt,
        })
    }
}
