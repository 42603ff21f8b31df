//! Page fetching for URL learning.

use std::time::Duration;

use crate::errors::{KnowledgeError, KnowledgeResult};

/// Fetch a page body with a bounded timeout.
///
/// Non-2xx responses are errors; the caller decides what to do with the
/// body (typically [`crate::normalize::extract_page_text`]).
pub async fn fetch_url(url: &str, timeout: Duration) -> KnowledgeResult<String> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| KnowledgeError::Fetch(format!("http client: {}", e)))?;

    let response = client
        .get(url)
        .header("User-Agent", "parley-knowledge/0.1")
        .send()
        .await
        .map_err(|e| KnowledgeError::Fetch(format!("HTTP fetch {}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(KnowledgeError::Fetch(format!(
            "HTTP {} for {}",
            response.status(),
            url
        )));
    }

    response
        .text()
        .await
        .map_err(|e| KnowledgeError::Fetch(format!("read body: {}", e)))
}
