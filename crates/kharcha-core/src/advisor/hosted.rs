//! Hosted advisor backend
//!
//! HTTP client for a hosted text-generation API (hosted-inference style:
//! POST `{inputs, parameters}` with a bearer token, response is
//! `[{"generated_text": ...}]`). One-shot request/response; the request
//! timeout is the only resilience measure - callers fall back to the local
//! templated analysis on any failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::AdvisorConfig;
use super::AdvisorBackend;
use crate::error::{Error, Result};

/// Generation parameters forwarded to the hosted model
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

/// Request body for the hosted generation endpoint
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParameters,
}

/// One element of the hosted endpoint's response array
#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Backend for a hosted text-generation API
#[derive(Clone)]
pub struct HostedBackend {
    http_client: Client,
    api_url: String,
    api_token: String,
    model: String,
    parameters: GenerationParameters,
}

impl HostedBackend {
    /// Build from config; `None` when the endpoint or token is missing
    pub fn from_config(config: &AdvisorConfig) -> Result<Option<Self>> {
        let (Some(api_url), Some(api_token)) = (&config.api_url, &config.api_token) else {
            return Ok(None);
        };

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Some(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_token: api_token.clone(),
            model: config.model.clone(),
            parameters: GenerationParameters {
                max_new_tokens: config.max_new_tokens,
                temperature: config.temperature,
                top_p: config.top_p,
            },
        }))
    }

    /// Build from environment variables (`ADVISOR_API_URL`, `ADVISOR_API_TOKEN`)
    pub fn from_env() -> Option<Self> {
        Self::from_config(&AdvisorConfig::from_env()).ok().flatten()
    }
}

#[async_trait]
impl AdvisorBackend for HostedBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(url = %self.api_url, prompt_len = prompt.len(), "Calling advisor model");

        let request = GenerateRequest {
            inputs: prompt,
            parameters: &self.parameters,
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = match status {
                StatusCode::UNAUTHORIZED => "authentication failed",
                StatusCode::FORBIDDEN => "access forbidden - check token permissions",
                StatusCode::NOT_FOUND => "model not available",
                StatusCode::SERVICE_UNAVAILABLE => "service unavailable",
                _ => "request failed",
            };
            warn!(status = %status, "Advisor model call failed: {}", detail);
            return Err(Error::Advisor(format!("{} ({})", detail, status)));
        }

        let output: Vec<GeneratedText> = response.json().await?;
        let answer = output
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| Error::Advisor("Empty response from advisor model".to_string()))?;

        // Some hosted models echo the prompt ahead of the completion
        let answer = answer
            .strip_prefix(prompt)
            .unwrap_or(&answer)
            .trim()
            .to_string();

        if answer.is_empty() {
            return Err(Error::Advisor(
                "Advisor model returned an empty answer".to_string(),
            ));
        }

        Ok(answer)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(&self.api_url)
            .bearer_auth(&self.api_token)
            .send()
            .await
        {
            Ok(response) => response.status().as_u16() < 500,
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.api_url
    }
}
