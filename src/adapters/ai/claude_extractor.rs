//! Claude implementation of the intent extractor.
//!
//! Talks to Anthropic's messages API and parses the reply into text plus a
//! structured action. Degradations, in order:
//!
//! - no API key configured: a deterministic bilingual echo reply, action
//!   `none` - the conversation contract shape survives with no upstream
//! - reply contains no parseable JSON block: the whole reply becomes plain
//!   text with action `none`
//! - transport or HTTP failure: an error, surfaced to the caller

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ExtractorConfig;
use crate::domain::conversation::MessageMetadata;
use crate::domain::foundation::{Language, SetupSessionId};
use crate::ports::{ExtractorError, ExtractorReply, IntentExtractor};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// System prompt steering the assistant toward structured onboarding
/// actions.
const SYSTEM_PROMPT: &str = r#"You are LaunchKit AI, helping merchants set up their e-commerce stores.

RULES:
1. Detect user's language (Arabic or English) and respond in same language
2. Be concise - max 3 sentences
3. Always suggest the next step
4. For store content, generate BOTH Arabic and English versions
5. Confirm before creating anything

RESPONSE FORMAT (JSON):
{
  "message": "Your response text",
  "action": {
    "type": "none" | "suggest_categories" | "preview_product",
    "data": { ... }
  }
}

When suggesting categories, include:
{ "type": "suggest_categories", "data": { "categories": [{ "nameAr": "...", "nameEn": "...", "descriptionAr": "...", "descriptionEn": "..." }] }}

When previewing product, include:
{ "type": "preview_product", "data": { "nameAr": "...", "nameEn": "...", "descriptionAr": "...", "descriptionEn": "...", "price": 0, "sku": "...", "variants": [{ "name": "Size", "options": ["S", "M", "L"] }] }}"#;

/// Configuration for the Claude extractor.
#[derive(Debug, Clone)]
pub struct ClaudeExtractorConfig {
    api_key: Option<Secret<String>>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_tokens: u32,
}

impl ClaudeExtractorConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(Secret::new(api_key.into())),
            ..Self::without_credentials()
        }
    }

    /// Creates a configuration with no credentials (fallback mode).
    pub fn without_credentials() -> Self {
        Self {
            api_key: None,
            model: "claude-3-sonnet-20240229".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(60),
            max_tokens: 1024,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
    }
}

impl From<&ExtractorConfig> for ClaudeExtractorConfig {
    fn from(config: &ExtractorConfig) -> Self {
        Self {
            api_key: config.anthropic_api_key.clone().map(Secret::new),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            max_tokens: config.max_tokens,
        }
    }
}

/// Claude-backed intent extractor.
pub struct ClaudeIntentExtractor {
    config: ClaudeExtractorConfig,
    client: Client,
}

impl ClaudeIntentExtractor {
    /// Creates a new extractor.
    ///
    /// # Errors
    ///
    /// - `InvalidResponse` if the HTTP client cannot be constructed
    pub fn new(config: ClaudeExtractorConfig) -> Result<Self, ExtractorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExtractorError::InvalidResponse(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    /// Deterministic reply used when no upstream is configured.
    fn fallback_reply(message: &str, language: Language) -> ExtractorReply {
        let response = match language {
            Language::Ar => format!(
                "شكراً لرسالتك: \"{}\". أنا هنا لمساعدتك في إعداد متجرك!",
                message
            ),
            Language::En => format!(
                "Thanks for your message: \"{}\". I'm here to help you set up your store!",
                message
            ),
        };
        ExtractorReply::plain(response)
    }
}

#[async_trait]
impl IntentExtractor for ClaudeIntentExtractor {
    async fn extract(
        &self,
        message: &str,
        session_id: &SetupSessionId,
        language: Language,
    ) -> Result<ExtractorReply, ExtractorError> {
        let Some(api_key) = self.config.api_key() else {
            tracing::debug!(%session_id, "no extractor credentials, using canned reply");
            return Ok(Self::fallback_reply(message, language));
        };

        let request = ClaudeRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: SYSTEM_PROMPT,
            messages: vec![ClaudeMessage {
                role: "user",
                content: message,
            }],
        };

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractorError::Network("request timed out".to_string())
                } else {
                    ExtractorError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%session_id, status = status.as_u16(), "extractor upstream error");
            return Err(ExtractorError::Upstream {
                status: status.as_u16(),
            });
        }

        let body: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| ExtractorError::InvalidResponse(e.to_string()))?;

        let text = body
            .content
            .first()
            .map(|block| block.text.as_str())
            .ok_or_else(|| {
                ExtractorError::InvalidResponse("empty content in completion".to_string())
            })?;

        Ok(parse_structured_reply(text))
    }
}

/// Parses the model's reply into text plus action.
///
/// The model is prompted to answer with a JSON object, possibly wrapped in
/// prose or a markdown fence. The widest brace-delimited slice is tried
/// first; anything that fails to parse falls back to the whole reply as
/// plain text with no action.
fn parse_structured_reply(text: &str) -> ExtractorReply {
    let Some(json_slice) = widest_json_slice(text) else {
        return ExtractorReply::plain(text);
    };

    match serde_json::from_str::<WireReply>(json_slice) {
        Ok(wire) => ExtractorReply {
            response: wire.message,
            action: wire.action,
        },
        Err(_) => ExtractorReply::plain(text),
    }
}

fn widest_json_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ClaudeMessage<'a>>,
}

#[derive(Serialize)]
struct ClaudeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// The structured shape the system prompt asks for.
#[derive(Deserialize)]
struct WireReply {
    message: String,
    #[serde(default)]
    action: MessageMetadata,
}
