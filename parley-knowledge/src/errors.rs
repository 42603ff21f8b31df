#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fetch error: {0}")]
    Fetch(String),
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;
