//! parley gateway: HTTP chat server backed by the knowledge corpus with a
//! local-model fallback.

pub mod chat;
pub mod providers;
pub mod server;
pub mod session;
pub mod state;
