//! Data directory layout.
//!
//! Everything parley persists lives under a single data root
//! (`$PARLEY_DATA_DIR`, or the platform data dir + `parley`): the knowledge
//! corpus, the current session log with its archives, and raw uploads.

use std::path::PathBuf;

/// Current session log file name, inside [`sessions_dir`].
pub const SESSION_FILE: &str = "session.json";

/// Knowledge corpus file name, inside the data root.
pub const KNOWLEDGE_FILE: &str = "knowledge.json";

#[derive(Debug, thiserror::Error)]
pub enum PathsError {
    #[error("missing data directory")]
    MissingDataDir,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn data_root() -> Result<PathBuf, PathsError> {
    if let Ok(override_dir) = std::env::var("PARLEY_DATA_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    let dir = dirs::data_dir().ok_or(PathsError::MissingDataDir)?;
    Ok(dir.join("parley"))
}

pub fn knowledge_file_path() -> Result<PathBuf, PathsError> {
    Ok(data_root()?.join(KNOWLEDGE_FILE))
}

pub fn sessions_dir() -> Result<PathBuf, PathsError> {
    Ok(data_root()?.join("sessions"))
}

pub fn uploads_dir() -> Result<PathBuf, PathsError> {
    Ok(data_root()?.join("uploads"))
}

/// Create the sessions and uploads directories if absent.
///
/// Called once at startup; the knowledge store creates its own parent on
/// first save.
pub fn ensure_dirs() -> Result<(), PathsError> {
    std::fs::create_dir_all(sessions_dir()?)?;
    std::fs::create_dir_all(uploads_dir()?)?;
    Ok(())
}
