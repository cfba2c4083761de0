//! Splint Core - feature dependency & activation engine.
//!
//! This crate provides the domain and application layers for the Splint
//! project scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           splint-cli (CLI)              │
//! │     (new, enable, disable, run ...)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │      (Engine, ProjectService)           │
//! │   Resolver: orders + conflict checks    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Feature, Category, LifecycleObserver,  │
//! │            ProjectStore)                │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    splint-adapters (Infrastructure)     │
//! │ (built-in features, observers, stores)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Name, Request, Registry, DependencyGraph)
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use splint_core::prelude::*;
//!
//! let mut registry = Registry::new();
//! registry.register_feature(FeatureDescriptor::new("delta", || Box::new(NoopFeature)))?;
//! registry.register_feature(
//!     FeatureDescriptor::new("charlie", || Box::new(NoopFeature)).requires(["delta"]),
//! )?;
//!
//! let mut engine = Engine::new(registry);
//! let plan = engine.activate(&Request::names(["charlie"]), false)?;
//! assert_eq!(plan.total_order, names(["delta", "charlie"]));
//! # Ok::<(), SplintError>(())
//! ```

// Names, requests, descriptors and the registry. No runtime objects.
pub mod domain;

// Resolver, runtime, engine and the ports adapters implement.
pub mod application;

pub mod error;

/// Everything needed to register a catalog and drive an engine.
pub mod prelude {
    pub use crate::application::{
        Category, Engine, Feature, FeatureCategory, InvokeContext, LifecycleEvent,
        LifecycleObserver, NoopFeature, Notifier, Order, Phase, Plan, ProjectService,
        ProjectStore,
    };
    pub use crate::domain::{
        CategoryDescriptor, FeatureDescriptor, MemberFactories, Mode, Name, ProjectState,
        Registry, Request, names,
    };
    pub use crate::error::{SplintError, SplintResult};
}
