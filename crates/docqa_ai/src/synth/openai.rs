use serde::Deserialize;
use serde_json::json;

use docqa_core::error::ProviderError;

use super::prompts::{build_user_prompt, SYSTEM_PROMPT};
use super::Synthesizer;
use crate::provider::ProviderClient;

// Low temperature; the prompt forbids invention anyway.
const TEMPERATURE: f32 = 0.2;

/// `POST /chat/completions` against an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiSynthesizer {
    client: ProviderClient,
    model: String,
}

impl OpenAiSynthesizer {
    pub fn new(client: ProviderClient, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatMessage {
    content: String,
}

impl Synthesizer for OpenAiSynthesizer {
    fn synthesize(&self, question: &str, contexts: &[String]) -> Result<String, ProviderError> {
        let body = json!({
            "model": self.model,
            "temperature": TEMPERATURE,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_user_prompt(question, contexts) },
            ],
        });
        let value = self.client.post_json("/chat/completions", body)?;

        let resp: ChatResponse = serde_json::from_value(value).map_err(|e| {
            ProviderError::MalformedResponse(format!("unexpected chat completion shape: {e}"))
        })?;

        let content = resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();
        let content = content.trim();
        if content.is_empty() {
            return Err(ProviderError::MalformedResponse(
                "chat completion was blank".to_string(),
            ));
        }
        Ok(content.to_string())
    }
}
