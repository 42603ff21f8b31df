//! File-backed knowledge corpus.

use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::errors::KnowledgeResult;
use crate::segment::split_sentences;

/// The persistent, deduplicated sentence corpus.
///
/// Backed by a single pretty-printed JSON array of strings; every mutation
/// rewrites the whole file. There is no cross-request caching and no
/// locking: concurrent writers race and the last full rewrite wins, which
/// is accepted for a single-user local tool. Callers needing stronger
/// guarantees must serialize access themselves.
pub struct KnowledgeStore {
    path: PathBuf,
}

impl KnowledgeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the corpus from disk.
    ///
    /// A missing file is created empty. An unparseable file loads as an
    /// empty corpus; the unreadable content is discarded by the next save.
    pub async fn load(&self) -> KnowledgeResult<Vec<String>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.save(&[]).await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(corpus) => Ok(corpus),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "knowledge file unreadable, starting from an empty corpus"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the backing file with the full corpus.
    pub async fn save(&self, corpus: &[String]) -> KnowledgeResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(corpus)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Ingest normalized text: segment it, merge the sentences not already
    /// in the corpus (exact string equality, insertion order preserved),
    /// persist, and return how many were added.
    pub async fn learn(&self, text: &str) -> KnowledgeResult<usize> {
        let candidates = split_sentences(text);
        let mut corpus = self.load().await?;

        let mut added = 0;
        for sentence in candidates {
            if !corpus.contains(&sentence) {
                corpus.push(sentence);
                added += 1;
            }
        }

        self.save(&corpus).await?;
        debug!(added, total = corpus.len(), "knowledge updated");
        Ok(added)
    }
}
