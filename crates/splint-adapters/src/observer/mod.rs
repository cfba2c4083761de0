//! Lifecycle observer adapters.

mod logging;
mod recording;

pub use logging::TracingObserver;
pub use recording::RecordingObserver;
