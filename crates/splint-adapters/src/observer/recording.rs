//! Observer that records every event, for tests and dry runs.

use std::sync::{Arc, Mutex};

use splint_core::application::{LifecycleEvent, LifecycleObserver, Order, Phase};

/// Records lifecycle events in memory.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to the engine.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event recorded so far.
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Subjects of the events matching `phase` and `order`, in order.
    pub fn subjects(&self, phase: Phase, order: Order) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.phase == phase && e.order == order)
            .map(|e| e.subject)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl LifecycleObserver for RecordingObserver {
    fn notify(&self, event: &LifecycleEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
