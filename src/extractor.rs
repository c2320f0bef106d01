//! Producers of structured fields from bulletin text
//!
//! [`RuleExtractor`] is the deterministic parser. [`LlmExtractor`] asks a
//! language model for the same fields; its output is only checked against
//! the expected JSON shape, never for exact values.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::LlmConfig,
    errors::NavtexError,
    models::{ExtractedMessage, ParsedMessage},
    parser,
};

#[async_trait]
pub trait MessageExtractor: Send + Sync {
    async fn extract(&self, raw_text: &str) -> Result<ParsedMessage, NavtexError>;
}

/// Deterministic pattern-based parser
#[derive(Debug, Default)]
pub struct RuleExtractor;

#[async_trait]
impl MessageExtractor for RuleExtractor {
    async fn extract(&self, raw_text: &str) -> Result<ParsedMessage, NavtexError> {
        Ok(parser::parse_message(raw_text)?)
    }
}

const SYSTEM_PROMPT: &str = "You extract fields from NAVTEX maritime safety messages. \
Reply with a single JSON object and nothing else, with keys: \
station_id (one uppercase letter after ZCZC), \
subject_id (the second letter after ZCZC), \
serial_number (integer from the two digits after the letters), \
timestamp_utc (ISO-8601 UTC date-time from the message body, or null), \
message_text (the text between the ZCZC and NNNN lines), \
coordinates (array of [longitude, latitude] pairs in decimal degrees, \
west and south negative, in order of appearance; empty if none).";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Extractor backed by an OpenAI-compatible chat completions endpoint
pub struct LlmExtractor {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmExtractor {
    pub fn new(config: LlmConfig) -> Result<Self, NavtexError> {
        config.validate()?;
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    pub(crate) fn with_client(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }

    async fn complete(&self, raw_text: &str) -> Result<String, NavtexError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: raw_text,
                },
            ],
            temperature: 0.0,
        };

        let mut builder = self.client.post(&self.config.endpoint).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NavtexError::HttpStatus {
                url: self.config.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                NavtexError::MalformedExternalOutput(e.to_string())
            } else {
                NavtexError::HttpError(e)
            }
        })?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                NavtexError::MalformedExternalOutput("response has no message content".to_string())
            })
    }
}

#[async_trait]
impl MessageExtractor for LlmExtractor {
    async fn extract(&self, raw_text: &str) -> Result<ParsedMessage, NavtexError> {
        let reply = self.complete(raw_text.trim()).await?;
        debug!("LLM reply: {}", reply);
        parse_llm_output(raw_text, &reply)
    }
}

/// Strip a surrounding Markdown code fence, if any
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Drop the info string, e.g. "json"
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim().contains('{') => body.trim(),
        _ => inner.trim(),
    }
}

/// Validate a model reply against the message schema
pub fn parse_llm_output(raw_text: &str, reply: &str) -> Result<ParsedMessage, NavtexError> {
    let extracted: ExtractedMessage = serde_json::from_str(strip_code_fence(reply))
        .map_err(|e| NavtexError::MalformedExternalOutput(e.to_string()))?;

    extracted
        .into_parsed(raw_text)
        .map_err(|e| NavtexError::MalformedExternalOutput(e.to_string()))
}
