//! Application layer for Splint.
//!
//! This layer contains:
//! - **Resolver**: turns requests into validated activation/deactivation plans
//! - **Services**: the `Engine` and the `ProjectService` built on it
//! - **Runtime**: the stock category runtime and lifecycle notifier
//! - **Ports**: Interface definitions (traits) for runtime objects and storage
//! - **Errors**: Application-specific error types
//!
//! The domain layer describes the graph; this layer decides what to do with
//! it and drives the runtime objects.

pub mod error;
pub mod ports;
pub mod resolver;
pub mod runtime;
pub mod services;

// Re-export main services
pub use services::{CategoryStatus, Engine, FeatureStatus, ProjectService};

pub use resolver::{ActiveSnapshot, Plan, Resolver};

pub use runtime::{FeatureCategory, InvokeContext, NoopFeature, Notifier};

// Re-export port traits (for adapter implementation)
pub use ports::{
    Category, Feature, LifecycleEvent, LifecycleObserver, Order, Phase, ProjectStore,
};

pub use error::ApplicationError;
