use crate::events::ProgramEvent;
use crate::ports::outbound::EventSink;
use parking_lot::Mutex;

/// Event sink that keeps every published event in order.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: Mutex<Vec<ProgramEvent>>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All published events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<ProgramEvent> {
        self.events.lock().clone()
    }

    /// Number of published events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True if nothing was published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drop all stored events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for InMemoryEventLog {
    fn publish(&self, event: ProgramEvent) -> Result<(), String> {
        self.events.lock().push(event);
        Ok(())
    }
}
