//! Infrastructure adapters for Splint.
//!
//! This crate implements the ports defined in `splint-core::application::ports`
//! and ships the built-in feature catalog. All file I/O lives here.

pub mod builtin_features;
pub mod observer;
pub mod store;

// Re-export commonly used adapters
pub use builtin_features::{builtin_registry, describe};
pub use observer::{RecordingObserver, TracingObserver};
pub use store::{JsonProjectStore, MemoryProjectStore, STATE_FILE};
