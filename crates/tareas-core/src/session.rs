use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tareas_shared::error::{ClientError, Result};
use tareas_shared::{Session, SessionStore};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Session persisted as `session.json` inside the data directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("session.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    #[tracing::instrument(skip(self))]
    fn load(&self) -> Option<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(file = %self.path.display(), error = %err, "no stored session");
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(file = %self.path.display(), error = %err, "ignoring unreadable session file");
                None
            }
        }
    }

    #[tracing::instrument(skip(self, session))]
    fn save(&self, session: &Session) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let storage = |err: std::io::Error| ClientError::Storage(err.to_string());

        let serialized =
            serde_json::to_string(session).map_err(|err| ClientError::Storage(err.to_string()))?;
        let mut temp = NamedTempFile::new_in(dir).map_err(storage)?;
        writeln!(temp, "{serialized}").map_err(storage)?;
        temp.flush().map_err(storage)?;
        temp.persist(&self.path)
            .map_err(|err| storage(err.error))?;

        debug!(file = %self.path.display(), "saved session");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(file = %self.path.display(), "removed session"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(file = %self.path.display(), error = %err, "failed to remove session"),
        }
    }
}
