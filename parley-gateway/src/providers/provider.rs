//! Provider trait for abstracting text-completion backends.
//!
//! The chat pipeline depends only on this trait, so swapping the local
//! llama.cpp server for any other completion service is a construction-time
//! choice, not a code change.

/// Provider error types
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("no completion in response")]
    NoContent,
    #[error("invalid response format: {0}")]
    InvalidFormat(String),
}

/// A text-completion backend.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name, for logging.
    fn name(&self) -> &str;

    /// Model identifier sent to the backend.
    fn model(&self) -> &str;

    /// Generate a bounded completion for a prompt at the given sampling
    /// temperature. Returns the trimmed completion text.
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ProviderError>;
}
