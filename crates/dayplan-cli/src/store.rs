//! JSON file backend for the board persistence port.

use std::path::{Path, PathBuf};

use dayplan_core::{BoardError, BoardStore, DayBoard};

/// Stores the board as pretty JSON at a fixed path.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BoardStore for JsonFileStore {
    fn load(&self) -> Result<Option<DayBoard>, BoardError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(BoardError::store(
                    format!("cannot read {}", self.path.display()),
                    e,
                ))
            }
        };
        let board = serde_json::from_str(&content).map_err(|e| {
            BoardError::store(format!("cannot parse {}", self.path.display()), e)
        })?;
        Ok(Some(board))
    }

    fn save(&self, board: &DayBoard) -> Result<(), BoardError> {
        let json = serde_json::to_string_pretty(board)
            .map_err(|e| BoardError::store("cannot serialize board", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                BoardError::store(format!("cannot create {}", parent.display()), e)
            })?;
        }

        // Write next to the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .map_err(|e| BoardError::store(format!("cannot write {}", tmp.display()), e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            BoardError::store(format!("cannot replace {}", self.path.display()), e)
        })?;
        tracing::debug!(path = %self.path.display(), "board saved");
        Ok(())
    }
}
