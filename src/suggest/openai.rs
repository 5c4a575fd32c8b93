//! OpenAI-compatible chat-completions suggester

use crate::config::SuggestConfig;
use crate::core::Vocabulary;
use crate::error::{Result, TagMatterError};
use crate::suggest::{parse_suggestion, system_prompt, Suggestion, TagSuggester};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Asks a chat-completions endpoint for tags, one blocking request per call
pub struct OpenAiSuggester {
    client: Client,
    api_key: String,
    config: SuggestConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiSuggester {
    pub fn new(api_key: impl Into<String>, config: SuggestConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }
}

impl TagSuggester for OpenAiSuggester {
    fn suggest(&self, code: &str, vocabulary: &Vocabulary) -> Result<Suggestion> {
        let system = system_prompt(vocabulary)?;
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: code,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        log::debug!("Requesting tags from {} ({})", self.endpoint(), self.config.model);
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TagMatterError::suggestion(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let completion: ChatResponse = response
            .json()
            .map_err(|e| TagMatterError::suggestion(format!("Failed to parse response: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| TagMatterError::suggestion("No choices in response"))?;

        log::debug!("Suggestion payload: {}", content);
        parse_suggestion(&content)
    }
}
