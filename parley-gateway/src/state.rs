//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use parley_core::Settings;
use parley_knowledge::KnowledgeStore;

use crate::providers::CompletionProvider;
use crate::session::SessionStore;

/// Everything a request handler needs.
///
/// The stores are stateless handles around their backing files, so the
/// state itself carries no locks; see the store docs for the accepted
/// lost-update race between concurrent mutations.
pub struct AppState {
    pub settings: Settings,
    pub knowledge: KnowledgeStore,
    pub sessions: SessionStore,
    pub provider: Arc<dyn CompletionProvider>,
    pub uploads_dir: PathBuf,
}

impl AppState {
    pub fn new(
        settings: Settings,
        knowledge: KnowledgeStore,
        sessions: SessionStore,
        provider: Arc<dyn CompletionProvider>,
        uploads_dir: PathBuf,
    ) -> Self {
        Self {
            settings,
            knowledge,
            sessions,
            provider,
            uploads_dir,
        }
    }
}
