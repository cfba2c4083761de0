//! In-memory project store for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use splint_core::{
    application::ProjectStore,
    domain::ProjectState,
    error::{SplintError, SplintResult},
};

/// In-memory project store, keyed by project root.
#[derive(Debug, Clone, Default)]
pub struct MemoryProjectStore {
    inner: Arc<RwLock<HashMap<PathBuf, ProjectState>>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one project.
    pub fn with_project(root: impl Into<PathBuf>, state: ProjectState) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.write() {
            inner.insert(root.into(), state);
        }
        store
    }

    /// Number of stored projects.
    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProjectStore for MemoryProjectStore {
    fn load(&self, root: &Path) -> SplintResult<Option<ProjectState>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        Ok(inner.get(root).cloned())
    }

    fn save(&self, root: &Path, state: &ProjectState) -> SplintResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        inner.insert(root.to_path_buf(), state.clone());
        Ok(())
    }
}

fn lock_error() -> SplintError {
    SplintError::Internal {
        message: "project store lock poisoned".into(),
    }
}
