//! Project Service - ties the engine to a project's persisted state.
//!
//! This service coordinates the project workflows:
//! 1. Load the project's enabled features
//! 2. Apply the request through the engine
//! 3. Persist the new enabled-feature list
//!
//! Only explicitly requested features are persisted. Dependencies are
//! re-derived on every open.

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ports::ProjectStore, resolver::Plan, services::Engine},
    domain::{Name, ProjectState, Request},
    error::SplintResult,
};

pub struct ProjectService {
    engine: Engine,
    store: Box<dyn ProjectStore>,
    root: PathBuf,
    state: ProjectState,
}

impl ProjectService {
    /// Create a new project at `root` with `request` enabled and set up.
    #[instrument(skip_all, fields(root = %root.as_ref().display(), request = %request))]
    pub fn create(
        mut engine: Engine,
        store: Box<dyn ProjectStore>,
        root: impl AsRef<Path>,
        request: &Request,
    ) -> SplintResult<Self> {
        let root = root.as_ref().to_path_buf();
        if store.load(&root)?.is_some() {
            return Err(ApplicationError::ProjectExists { path: root }.into());
        }

        let plan = engine.activate(request, true)?;
        let state = ProjectState::new(plan.flatten_order.clone());
        store.save(&root, &state)?;

        info!(features = state.features.len(), "Project created");
        Ok(Self {
            engine,
            store,
            root,
            state,
        })
    }

    /// Open the project at `root`, re-activating its enabled features.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(
        mut engine: Engine,
        store: Box<dyn ProjectStore>,
        root: impl AsRef<Path>,
    ) -> SplintResult<Self> {
        let root = root.as_ref().to_path_buf();
        let state = store
            .load(&root)?
            .ok_or_else(|| ApplicationError::ProjectNotFound { path: root.clone() })?;

        if !state.features.is_empty() {
            engine.activate(&Request::Names(state.features.clone()), false)?;
        }

        Ok(Self {
            engine,
            store,
            root,
            state,
        })
    }

    /// Enable and set up `request`, recording what was asked for.
    pub fn enable(&mut self, request: &Request) -> SplintResult<Plan> {
        let plan = self.engine.activate(request, true)?;
        self.persist(self.state.with_added(&plan.flatten_order))?;
        Ok(plan)
    }

    /// Disable `request`.
    ///
    /// Other recorded features are never removed as a side effect, even if
    /// they were also pulled in as a dependency of the request.
    pub fn disable(&mut self, request: &Request, tear_down: bool) -> SplintResult<Plan> {
        let skip = self.protected(request)?;
        let plan = self.engine.deactivate(request, tear_down, &skip)?;
        self.persist(self.state.with_removed(&plan.flatten_order))?;
        Ok(plan)
    }

    /// What `disable` would do.
    pub fn preview_disable(&self, request: &Request) -> SplintResult<Plan> {
        let skip = self.protected(request)?;
        self.engine.deactivation_order(request, &skip)
    }

    pub fn invoke(&self, name: &str, action: Option<&str>) -> SplintResult<Vec<String>> {
        self.engine.invoke(name, action)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Recorded features that `request` does not name.
    fn protected(&self, request: &Request) -> SplintResult<Vec<Name>> {
        let requested = self.engine.deactivation_order(request, &[])?.flatten_order;
        Ok(self
            .state
            .features
            .iter()
            .filter(|f| !requested.contains(f))
            .cloned()
            .collect())
    }

    fn persist(&mut self, state: ProjectState) -> SplintResult<()> {
        self.store.save(&self.root, &state)?;
        self.state = state;
        Ok(())
    }
}
