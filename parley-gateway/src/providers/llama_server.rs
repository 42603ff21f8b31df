//! OpenAI-compatible completions client for local model servers.
//!
//! Targets llama.cpp's `llama-server` but works against anything exposing
//! the legacy `/v1/completions` endpoint. The legacy endpoint is used on
//! purpose: the chat pipeline sends an already-templated instruction prompt
//! and wants the raw completion back.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::providers::provider::{CompletionProvider, ProviderError};

#[derive(Clone)]
pub struct LlamaServerClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

/// Request body for the completions API
#[derive(Debug, Serialize)]
struct CompletionsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionsResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: String,
}

impl LlamaServerClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        })
    }

    fn completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{}/completions", base)
        } else {
            format!("{}/v1/completions", base)
        }
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            let auth_value = format!("Bearer {}", api_key);
            if let Ok(header_value) = HeaderValue::from_str(&auth_value) {
                headers.insert(AUTHORIZATION, header_value);
            }
        }
        headers
    }
}

#[async_trait::async_trait]
impl CompletionProvider for LlamaServerClient {
    fn name(&self) -> &str {
        "llama-server"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ProviderError> {
        let request_body = CompletionsRequest {
            model: &self.model,
            prompt,
            max_tokens,
            temperature,
        };

        let response = self
            .http_client
            .post(self.completions_url())
            .headers(self.build_headers())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response_text = response.text().await?;
        let completions: CompletionsResponse = serde_json::from_str(&response_text)
            .map_err(|e| ProviderError::InvalidFormat(format!("completions response: {}", e)))?;

        let choice = completions
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::NoContent)?;

        Ok(choice.text.trim().to_string())
    }
}
