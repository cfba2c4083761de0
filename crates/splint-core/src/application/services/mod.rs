//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "enable a feature" or "create a project".

pub mod engine;
pub mod project_service;

pub use engine::{CATEGORY_FLAG_PREFIX, CategoryStatus, Engine, FEATURE_FLAG_PREFIX, FeatureStatus};
pub use project_service::ProjectService;
