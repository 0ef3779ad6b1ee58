//! Remote participant decisions over signed webhooks.

use std::time::Duration;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use arena_engine::TurnAction;

use crate::error::ProviderError;
use crate::provider::{Decision, DecisionProvider};
use crate::view::TurnView;

type HmacSha256 = Hmac<Sha256>;

/// Calls a registered participant's callback URL with the signed turn view
/// and parses the reply into a [`Decision`].
///
/// Every failure mode (connect, status, body, token) surfaces as a
/// [`ProviderError`]; the orchestrator turns those into fallback moves.
pub struct WebhookProvider {
    client: reqwest::Client,
    callback_url: String,
    secret: String,
}

/// Reply shape expected from the callback.
#[derive(Debug, Deserialize)]
struct WebhookReply {
    action: String,
    #[serde(default)]
    thinking: String,
    #[serde(default, alias = "trash_talk")]
    taunt: String,
}

impl WebhookProvider {
    pub fn new(callback_url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            callback_url: callback_url.into(),
            secret: secret.into(),
        }
    }

    /// Hex HMAC-SHA256 over the exact request body, keyed with the
    /// participant's secret. The receiver recomputes this to authenticate
    /// the arena.
    pub fn sign(secret: &str, payload: &[u8]) -> String {
        let mut mac =
            HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }
}

#[async_trait]
impl DecisionProvider for WebhookProvider {
    async fn decide(&self, view: &TurnView) -> Result<Decision, ProviderError> {
        let body = serde_json::to_string(view).map_err(ProviderError::Encode)?;
        let signature = Self::sign(&self.secret, body.as_bytes());

        tracing::debug!(
            url = %self.callback_url,
            match_id = %view.match_id,
            turn = view.turn,
            "requesting webhook decision"
        );

        let response = self
            .client
            .post(&self.callback_url)
            .timeout(Duration::from_millis(view.deadline_ms))
            .header("Content-Type", "application/json")
            .header("X-Signature", signature)
            .header("X-Match-Id", &view.match_id)
            .body(body)
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::BadStatus {
                status: status.as_u16(),
            });
        }

        let reply: WebhookReply = response.json().await.map_err(ProviderError::Transport)?;
        let action =
            TurnAction::parse_token(&reply.action).ok_or_else(|| ProviderError::MalformedReply {
                reason: format!("unrecognized action token {:?}", reply.action),
            })?;

        Ok(Decision {
            action,
            token: reply.action,
            thinking: reply.thinking,
            taunt: reply.taunt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_deterministic_hex_sha256() {
        let a = WebhookProvider::sign("secret", b"payload");
        let b = WebhookProvider::sign("secret", b"payload");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, WebhookProvider::sign("other", b"payload"));
        assert_ne!(a, WebhookProvider::sign("secret", b"payload2"));
    }

    #[test]
    fn reply_parses_with_optional_fields_missing() {
        let reply: WebhookReply = serde_json::from_str(r#"{"action": "ATTACK_2"}"#).unwrap();
        assert_eq!(reply.action, "ATTACK_2");
        assert!(reply.thinking.is_empty());
        assert!(reply.taunt.is_empty());
    }

    #[test]
    fn reply_accepts_trash_talk_alias() {
        let reply: WebhookReply =
            serde_json::from_str(r#"{"action": "PASS", "trash_talk": "Too slow."}"#).unwrap();
        assert_eq!(reply.taunt, "Too slow.");
    }
}
