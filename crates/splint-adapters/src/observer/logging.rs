//! Observer that mirrors lifecycle events into `tracing`.

use splint_core::application::{LifecycleEvent, LifecycleObserver, Order, Phase};
use tracing::{debug, info};

/// Production observer: batch phases log at `INFO`, every other step at
/// `DEBUG` once it completes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl LifecycleObserver for TracingObserver {
    fn notify(&self, event: &LifecycleEvent) {
        let batch = matches!(
            event.phase,
            Phase::FeatureActivation | Phase::FeatureDeactivation
        );

        match (batch, event.order) {
            (true, Order::Before) => info!(phase = %event.phase, request = %event.subject, "starting"),
            (true, Order::After) => info!(phase = %event.phase, request = %event.subject, "finished"),
            (false, Order::After) => debug!(phase = %event.phase, subject = %event.subject, "done"),
            (false, Order::Before) => {}
        }
    }
}
