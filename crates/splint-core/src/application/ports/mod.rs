//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the engine, implemented elsewhere
//!   - `Feature` / `Category`: runtime objects behind registered names
//!   - `LifecycleObserver`: lifecycle instrumentation
//!   - `ProjectStore`: persisted enabled-feature lists
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    Category, Feature, LifecycleEvent, LifecycleObserver, Order, Phase, ProjectStore,
};

#[cfg(test)]
pub use output::{MockLifecycleObserver, MockProjectStore};
