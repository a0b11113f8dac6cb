//! GeminiApiAgent - answers questions through the Gemini REST API.

use async_trait::async_trait;
use jot_core::config::{AnswerConfig, DEFAULT_GEMINI_MODEL};
use jot_core::error::{JotError, Result};
use reqwest::{header::HeaderValue, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::AnswerAgent;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    system_instruction: Option<String>,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
            system_instruction: None,
        }
    }

    /// Builds an agent from the `[answer]` config section.
    ///
    /// The API key comes from the config file or `GEMINI_API_KEY`; the model
    /// defaults to `gemini-2.5-flash`. `base_url` and `system_instruction`
    /// are applied when set.
    pub fn from_config(config: &AnswerConfig) -> Result<Self> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            JotError::config("Gemini API key not found in config.toml or GEMINI_API_KEY")
        })?;
        let model = if config.model.trim().is_empty() {
            DEFAULT_GEMINI_MODEL.to_string()
        } else {
            config.model.clone()
        };
        let mut agent = Self::new(api_key, model);
        if let Some(base_url) = config.base_url.as_deref().filter(|url| !url.trim().is_empty()) {
            agent = agent.with_base_url(base_url.trim_end_matches('/'));
        }
        if let Some(instruction) = &config.system_instruction {
            agent = agent.with_system_instruction(instruction.as_str());
        }
        Ok(agent)
    }

    /// Points the agent at another endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Adds a system instruction that will be sent alongside every request.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, prompt: &str) -> Result<GenerateContentRequest> {
        if prompt.trim().is_empty() {
            return Err(JotError::collaborator("Gemini prompt must not be empty"));
        }

        let contents = vec![Content {
            role: "user".to_string(),
            parts: vec![Part::Text {
                text: prompt.to_string(),
            }],
        }];

        let system_instruction = self.system_instruction.as_ref().map(|text| Content {
            role: "system".to_string(),
            parts: vec![Part::Text {
                text: text.to_string(),
            }],
        });

        Ok(GenerateContentRequest {
            contents,
            system_instruction,
        })
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| JotError::collaborator(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            JotError::collaborator(format!("Failed to parse Gemini response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl AnswerAgent for GeminiApiAgent {
    async fn ask(&self, prompt: &str) -> Result<String> {
        let request = self.build_request(prompt)?;
        debug!(
            "[GeminiApiAgent] Sending {} chars to {}",
            prompt.len(),
            self.model
        );
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            JotError::collaborator("Gemini API returned no text in the response candidates")
        })
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> JotError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    match retry_after {
        Some(delay) => JotError::collaborator(format!(
            "Gemini API error {} (retry after {}s): {}",
            status.as_u16(),
            delay.as_secs(),
            message
        )),
        None => JotError::collaborator(format!(
            "Gemini API error {}: {}",
            status.as_u16(),
            message
        )),
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    value.parse::<u64>().ok().map(Duration::from_secs)
}
