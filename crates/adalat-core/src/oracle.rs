//! Generation oracle: the opaque text-completion call behind every agent,
//! router, and verdict turn.
//!
//! The core treats the oracle as a black box: one synchronous
//! request/response per turn, no retry, no timeout policy beyond the HTTP
//! client's own. A failed call is fatal to the run (state accumulated so
//! far is still persisted by the caller).
//!
//! API key: `OPENROUTER_API_KEY` in `.env`. Model override: `ADALAT_MODEL`.

use crate::error::OracleError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "meta-llama/llama-3.3-70b-instruct";

/// One completion call: role instruction + user-turn payload in, free text
/// out. Implementations must be safe to share across turns.
#[async_trait]
pub trait CompletionOracle: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, OracleError>;
}

// OpenAI-compatible request/response for OpenRouter
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

/// OpenRouter-backed oracle used by the CLI.
pub struct OpenRouterOracle {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenRouterOracle {
    /// Build from environment. `OPENROUTER_API_KEY` is required;
    /// `ADALAT_MODEL` overrides the default model.
    pub fn from_env() -> Result<Self, OracleError> {
        let key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(OracleError::MissingApiKey)?;
        let oracle = match std::env::var("ADALAT_MODEL") {
            Ok(model) if !model.trim().is_empty() => Self::new(key).with_model(model.trim()),
            _ => Self::new(key),
        };
        Ok(oracle)
    }

    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            api_key: api_key.trim().to_string(),
            model: DEFAULT_MODEL.to_string(),
            client,
        }
    }

    /// Set the model (e.g. `meta-llama/llama-3.3-70b-instruct`).
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

#[async_trait]
impl CompletionOracle for OpenRouterOracle {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, OracleError> {
        let url = format!("{}/chat/completions", OPENROUTER_API_BASE);
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature,
        };

        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("X-Title", "Adalat-Courtroom-Simulation")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::Request(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(OracleError::Api { status, body });
        }

        let parsed: ChatResponse = res
            .json()
            .await
            .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| OracleError::MalformedResponse("no choices in response".to_string()))
    }
}
