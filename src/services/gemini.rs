use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::models::{GenerateOptions, Generation};
use crate::services::generator::{GenerationError, TextGenerator};

/// Base URL for the Gemini REST API
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for discovery prompts
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Outcome of the one-off API key check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiCheck {
    Ok,
    Failed { error: String },
}

/// Gemini `generateContent` client
///
/// The API key is read lazily: a client without a key can be constructed,
/// but every generation call fails with [`GenerationError::MissingApiKey`].
pub struct GeminiClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
    api_check: OnceCell<ApiCheck>,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: Option<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            base_url,
            api_key: api_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            client,
            api_check: OnceCell::new(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self, model: &str, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            model,
            urlencoding::encode(api_key)
        )
    }

    async fn call_api(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<Generation, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;

        let request = GeminiRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: options.max_output_tokens,
                temperature: options.temperature,
            },
            system_instruction: options.system_instruction.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
        };

        tracing::debug!(model = %options.model, "Calling Gemini generateContent");

        let response = self
            .client
            .post(self.endpoint(&options.model, api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(status.as_u16(), &body);
            tracing::error!("Gemini API error {}: {}", status, message);
            return Err(GenerationError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("Failed to read body: {}", e)))?;

        let parsed: GeminiResponse = serde_json::from_value(raw.clone()).unwrap_or_default();
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        Ok(Generation {
            text,
            raw: Some(raw),
        })
    }

    /// Verify the API key once per process; later calls reuse the first result
    pub async fn check_api(&self) -> ApiCheck {
        self.api_check
            .get_or_init(|| async {
                let options = GenerateOptions {
                    model: DEFAULT_MODEL.to_string(),
                    max_output_tokens: 10,
                    temperature: 0.7,
                    system_instruction: None,
                };
                match self.call_api("Reply with exactly: OK", &options).await {
                    Ok(_) => ApiCheck::Ok,
                    Err(e) => ApiCheck::Failed {
                        error: e.to_string(),
                    },
                }
            })
            .await
            .clone()
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<Generation, GenerationError> {
        self.call_api(prompt, options).await
    }
}

/// Human-readable message for a failed call: `error.message`, else the body
fn api_error_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        format!("Gemini API error {}", status)
    } else {
        body.to_string()
    }
}
