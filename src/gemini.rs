use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::config::{Config, GenerationSettings};
use crate::error::{GenerationError, TransportError};

/// One structured-output request: a prompt plus the schema the reply must follow.
#[derive(Debug, Clone)]
pub struct ContentRequest<'a> {
    pub prompt: &'a str,
    pub response_schema: &'a Value,
    pub settings: &'a GenerationSettings,
}

/// Seam between the recipe client and the model service.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Returns the raw text payload of the first candidate, possibly empty.
    async fn generate_content(&self, request: ContentRequest<'_>) -> Result<String, GenerationError>;
}

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.api_key.clone(), config.api_base.clone())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// The key travels in a header so it never appears in a URL that
    /// reqwest may echo back inside an error.
    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn request_body(request: &ContentRequest<'_>) -> Value {
        json!({
            "contents": [{
                "parts": [{"text": request.prompt}]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
                "temperature": request.settings.temperature,
                "topP": request.settings.top_p
            }
        })
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_content(&self, request: ContentRequest<'_>) -> Result<String, GenerationError> {
        let url = self.endpoint(&request.settings.model);
        info!("🔗 Making request to: {}", url);

        let body = Self::request_body(&request);
        debug!("📤 Request body: {}", body);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        let response_text = response.text().await?;
        if !status.is_success() {
            error!("❌ Gemini API error response: {}", response_text);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: response_text,
            }
            .into());
        }
        debug!("📥 Raw Gemini API response: {}", response_text);

        let parsed: GeminiResponse = serde_json::from_str(&response_text)
            .map_err(|e| TransportError::Status {
                status: status.as_u16(),
                body: format!("unreadable envelope: {e}"),
            })?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            error!("❌ Prompt blocked by Gemini: {}", reason);
            return Err(TransportError::Blocked(reason).into());
        }

        Ok(first_candidate_text(&parsed))
    }
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Other(Value),
}

/// Structured output may arrive split across several text parts.
fn first_candidate_text(resp: &GeminiResponse) -> String {
    resp.candidates
        .first()
        .map(|c| {
            c.content
                .parts
                .iter()
                .filter_map(|p| match p {
                    Part::Text { text } => Some(text.as_str()),
                    Part::Other(_) => None,
                })
                .collect::<String>()
        })
        .unwrap_or_default()
}
