//! HTTP client for the Gemini `generateContent` REST surface.

use serde::{Deserialize, Serialize};

use super::{ProviderError, TextGenerate};
use crate::config::ProviderConfig;

/// Blocking HTTP client for the generative-text provider.
///
/// Calls are synchronous; the API layer runs them on the blocking pool.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client for the configured provider with a 60-second request timeout.
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(&config.base_url, &config.api_key, 60)
    }
}

/// Request body for `models/{model}:generateContent`
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: String,
}

impl TextGenerate for GeminiClient {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    ProviderError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    ProviderError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| ProviderError::ResponseParsing(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(ProviderError::EmptyReply)
    }
}

/// Mock provider for testing — a configurable reply, optionally preceded by
/// a number of connection failures, with a record of the models tried.
pub struct MockTextClient {
    reply: Option<String>,
    failures_remaining: std::sync::Mutex<u32>,
    models_tried: std::sync::Mutex<Vec<String>>,
}

impl MockTextClient {
    /// Always succeeds with the given reply.
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            failures_remaining: std::sync::Mutex::new(0),
            models_tried: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Always fails with a connection error.
    pub fn failing() -> Self {
        Self {
            reply: None,
            failures_remaining: std::sync::Mutex::new(0),
            models_tried: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Fails `failures` times, then succeeds with the given reply.
    pub fn flaky(failures: u32, reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            failures_remaining: std::sync::Mutex::new(failures),
            models_tried: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Models passed to `generate`, in call order.
    pub fn models_tried(&self) -> Vec<String> {
        self.models_tried.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl TextGenerate for MockTextClient {
    fn generate(&self, model: &str, _prompt: &str) -> Result<String, ProviderError> {
        if let Ok(mut tried) = self.models_tried.lock() {
            tried.push(model.to_string());
        }
        if let Ok(mut failures) = self.failures_remaining.lock() {
            if *failures > 0 {
                *failures -= 1;
                return Err(ProviderError::Connection("mock".into()));
            }
        }
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(ProviderError::Connection("mock".into())),
        }
    }
}
