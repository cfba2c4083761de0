//! Project state as a JSON file in the project root.

use std::io;
use std::path::{Path, PathBuf};

use splint_core::{
    application::{ApplicationError, ProjectStore},
    domain::ProjectState,
    error::{SplintError, SplintResult},
};
use tracing::debug;
use uuid::Uuid;

/// Default state file name, relative to the project root.
pub const STATE_FILE: &str = ".splint.json";

/// Production store: one JSON document per project.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash never leaves a half-written state file behind.
#[derive(Debug, Clone)]
pub struct JsonProjectStore {
    file_name: String,
}

impl JsonProjectStore {
    pub fn new() -> Self {
        Self::with_file_name(STATE_FILE)
    }

    /// Use a different state file name inside the project root.
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn state_path(&self, root: &Path) -> PathBuf {
        root.join(&self.file_name)
    }
}

impl Default for JsonProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectStore for JsonProjectStore {
    fn load(&self, root: &Path) -> SplintResult<Option<ProjectState>> {
        let path = self.state_path(root);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(state_error(&path, "read", e)),
        };

        let state = serde_json::from_str(&content).map_err(|e| state_error(&path, "parse", e))?;
        debug!(path = %path.display(), "Loaded project state");
        Ok(Some(state))
    }

    fn save(&self, root: &Path, state: &ProjectState) -> SplintResult<()> {
        std::fs::create_dir_all(root).map_err(|e| state_error(root, "create directory", e))?;

        let path = self.state_path(root);
        let tmp = root.join(format!("{}.{}.tmp", self.file_name, Uuid::new_v4()));

        let content =
            serde_json::to_string_pretty(state).map_err(|e| state_error(&path, "serialize", e))?;
        std::fs::write(&tmp, content).map_err(|e| state_error(&tmp, "write", e))?;
        std::fs::rename(&tmp, &path).map_err(|e| state_error(&path, "replace", e))?;

        debug!(path = %path.display(), features = state.features.len(), "Saved project state");
        Ok(())
    }
}

fn state_error(path: &Path, operation: &str, e: impl std::fmt::Display) -> SplintError {
    ApplicationError::StateError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
