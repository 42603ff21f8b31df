//! Completion provider abstraction and backends.

pub mod llama_server;
pub mod provider;

pub use llama_server::LlamaServerClient;
pub use provider::{CompletionProvider, ProviderError};
