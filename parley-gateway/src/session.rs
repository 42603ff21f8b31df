//! Flat-file conversation session store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::warn;

use parley_core::ConversationTurn;
use parley_core::paths::SESSION_FILE;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// The current conversation log plus its timestamped archives.
///
/// One JSON file holds the live session; `archive_snapshot` copies it to a
/// timestamp-named sibling without rotating it. Like the knowledge store,
/// every operation re-reads the file and mutations rewrite it whole, so
/// concurrent writers race (last write wins).
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn current_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Load the current session log; absent or unparseable files load as an
    /// empty log.
    pub async fn load_current(&self) -> SessionResult<Vec<ConversationTurn>> {
        let raw = match tokio::fs::read_to_string(self.current_path()).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(turns) => Ok(turns),
            Err(e) => {
                warn!(
                    path = %self.current_path().display(),
                    error = %e,
                    "session file unreadable, starting from an empty log"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Append one turn to the current log and persist it.
    ///
    /// Turns missing a timestamp (the new one included) are stamped with
    /// the current time before writing.
    pub async fn append_turn(&self, turn: ConversationTurn) -> SessionResult<()> {
        let mut turns = self.load_current().await?;
        turns.push(turn);
        backfill_timestamps(&mut turns);
        self.write(&self.current_path(), &turns).await
    }

    /// Copy the current log to a timestamp-named archive file.
    ///
    /// The current log is left in place; repeated calls within the same
    /// second overwrite the same archive.
    pub async fn archive_snapshot(&self) -> SessionResult<PathBuf> {
        let mut turns = self.load_current().await?;
        backfill_timestamps(&mut turns);

        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let path = self.dir.join(format!("session_{}.json", stamp));
        self.write(&path, &turns).await?;
        Ok(path)
    }

    async fn write(&self, path: &Path, turns: &[ConversationTurn]) -> SessionResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(turns)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

fn backfill_timestamps(turns: &mut [ConversationTurn]) {
    for turn in turns {
        turn.timestamp.get_or_insert_with(Utc::now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path())
    }

    #[tokio::test]
    async fn test_append_preserves_order_and_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .append_turn(ConversationTurn::now("first", "reply one"))
            .await
            .unwrap();
        store
            .append_turn(ConversationTurn::now("second", "reply two"))
            .await
            .unwrap();

        let turns = store.load_current().await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].user, "first");
        assert_eq!(turns[1].user, "second");
        assert!(turns.iter().all(|t| t.timestamp.is_some()));
    }

    #[tokio::test]
    async fn test_append_backfills_missing_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let unstamped = ConversationTurn {
            user: "old".to_string(),
            bot: "turn".to_string(),
            timestamp: None,
        };
        store.append_turn(unstamped).await.unwrap();

        let turns = store.load_current().await.unwrap();
        assert!(turns[0].timestamp.is_some());
    }

    #[tokio::test]
    async fn test_archive_copies_without_clearing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .append_turn(ConversationTurn::now("keep", "me"))
            .await
            .unwrap();

        let archive_path = store.archive_snapshot().await.unwrap();
        let name = archive_path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("session_") && name.ends_with(".json"));

        // Archive holds the same turns, and the current log is untouched.
        let archived: Vec<ConversationTurn> =
            serde_json::from_str(&std::fs::read_to_string(&archive_path).unwrap()).unwrap();
        let current = store.load_current().await.unwrap();
        assert_eq!(archived, current);
        assert_eq!(current.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_session_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "[{bad json").unwrap();

        let store = store_in(&dir);
        assert!(store.load_current().await.unwrap().is_empty());
    }
}
