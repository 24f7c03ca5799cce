use std::sync::{Arc, Mutex};

use contrib_core::PublishEvent;

/// Журнал всего, что площадка приняла через `publish`.
///
/// Клонируется дёшево, все клоны смотрят в один журнал.
#[derive(Debug, Clone, Default)]
pub struct PublishLedger {
    events: Arc<Mutex<Vec<PublishEvent>>>,
}

impl PublishLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, event: PublishEvent) -> usize {
        let mut events = match self.events.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event);
        events.len()
    }

    /// Сколько событий принято
    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(g) => g.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Копия журнала
    pub fn snapshot(&self) -> Vec<PublishEvent> {
        match self.events.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
