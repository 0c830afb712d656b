//! Narrative service backed by an OpenAI-compatible chat-completions API
//! (Ollama, LM Studio, or a hosted endpoint).

use std::time::Duration;

use async_trait::async_trait;
use ironhold_core::config::GameConfig;
use ironhold_core::error::DomainError;
use ironhold_core::narrative::{NarrativeContext, NarrativeReply, NarrativeService};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::prompts::prompt_for;

/// Request timeout for one generation.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Talks to `{base_url}/v1/chat/completions`.
#[derive(Debug, Clone)]
pub struct ChatNarrativeService {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl ChatNarrativeService {
    /// Creates a client for `base_url` and `model`.
    #[must_use]
    pub fn new(base_url: &str, model: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
            api_key: None,
            temperature: 0.7,
        }
    }

    /// Creates a client from the narrative settings in `config`.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            api_key: config.narrative_api_key.clone(),
            temperature: config.narrative_temperature,
            ..Self::new(&config.narrative_base_url, &config.narrative_model)
        }
    }

    /// The full completions endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn build_request(&self, context: &NarrativeContext) -> ChatRequest {
        let prompt = prompt_for(context);
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_owned(),
                    content: prompt.system,
                },
                ChatMessage {
                    role: "user".to_owned(),
                    content: prompt.user,
                },
            ],
            temperature: self.temperature,
        }
    }
}

fn first_content(response: ChatResponse) -> Result<String, DomainError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| DomainError::Narrative("no choices in response".to_owned()))
}

#[async_trait]
impl NarrativeService for ChatNarrativeService {
    async fn generate(&self, context: &NarrativeContext) -> Result<NarrativeReply, DomainError> {
        let request = self.build_request(context);

        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DomainError::Narrative(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Narrative(format!("backend returned {status}: {body}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Narrative(format!("invalid response: {e}")))?;
        let content = first_content(parsed)?;
        debug!(model = %self.model, chars = content.len(), "narrative generated");

        Ok(NarrativeReply::from_raw(&content))
    }
}
