use std::sync::{Arc, Mutex};
use std::thread;

use contrib_core::{Event, EventHandler, TransportError};
use crossbeam_channel::Sender;
use log::{debug, warn};

/// Поток доставки событий: очередь + один поток, который вызывает обработчик.
///
/// События доставляются в порядке постановки в очередь.
pub(crate) struct Dispatcher {
    tx: Mutex<Option<Sender<Event>>>,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl Dispatcher {
    pub(crate) fn spawn(handler: Arc<dyn EventHandler>) -> Result<Self, TransportError> {
        let (tx, rx) = crossbeam_channel::unbounded::<Event>();

        let handle = thread::Builder::new()
            .name("venue-dispatch".into())
            .spawn(move || {
                // очередь закрывается в close(), тогда и выходим
                for event in rx.iter() {
                    handler.handle(&event);
                }
                debug!("dispatch thread finished");
            })
            .map_err(|e| TransportError::StartFailed(format!("dispatch thread: {e}")))?;

        Ok(Self {
            tx: Mutex::new(Some(tx)),
            handle: Mutex::new(Some(handle)),
        })
    }

    pub(crate) fn post(&self, event: Event) -> Result<(), TransportError> {
        let tx = match self.tx.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        match tx.as_ref() {
            Some(tx) => tx.send(event).map_err(|_| TransportError::Closed),
            None => Err(TransportError::Closed),
        }
    }

    /// Закрывает очередь и ждёт, пока поток разгребёт остаток.
    pub(crate) fn close(&self) {
        {
            let mut tx = match self.tx.lock() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            tx.take();
        }

        let handle = {
            let mut h = match self.handle.lock() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            h.take()
        };

        let Some(handle) = handle else {
            return;
        };

        // из самого потока доставки join невозможен
        if handle.thread().id() == thread::current().id() {
            return;
        }

        if let Err(panic) = handle.join() {
            warn!("dispatch thread panicked: {:?}", panic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contrib_core::{EventType, Message};

    struct Collect(Mutex<Vec<String>>);

    impl EventHandler for Collect {
        fn handle(&self, event: &Event) {
            let mut seen = self.0.lock().unwrap();
            for msg in event {
                seen.push(msg.message_type().to_string());
            }
        }
    }

    #[test]
    fn delivers_in_order_and_drains_on_close() {
        let handler = Arc::new(Collect(Mutex::new(Vec::new())));
        let dispatcher = Dispatcher::spawn(handler.clone()).unwrap();

        for name in ["A", "B", "C"] {
            dispatcher
                .post(Event::single(EventType::Admin, Message::new(name)))
                .unwrap();
        }
        dispatcher.close();

        assert_eq!(*handler.0.lock().unwrap(), vec!["A", "B", "C"]);
    }

    #[test]
    fn post_after_close_fails() {
        let handler = Arc::new(Collect(Mutex::new(Vec::new())));
        let dispatcher = Dispatcher::spawn(handler).unwrap();
        dispatcher.close();
        // повторный close безопасен
        dispatcher.close();

        let err = dispatcher
            .post(Event::single(EventType::Admin, Message::new("late")))
            .unwrap_err();
        assert!(matches!(err, TransportError::Closed));
    }
}
