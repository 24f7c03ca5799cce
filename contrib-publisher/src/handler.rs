use std::sync::Arc;

use contrib_core::names::{AUTHORIZATION_SUCCESS, SESSION_TERMINATED};
use contrib_core::{Event, EventHandler, EventType};
use log::{debug, info};

use crate::state::SharedState;

/// Обработчик событий сессии.
///
/// Сначала смотрим на тип события: статусы сессии трогают только флаг
/// `running`, всё остальное может закрыть ожидающую авторизацию.
pub(crate) struct PublisherEventHandler {
    state: Arc<SharedState>,
}

impl PublisherEventHandler {
    pub(crate) fn new(state: Arc<SharedState>) -> Self {
        Self { state }
    }
}

impl EventHandler for PublisherEventHandler {
    fn handle(&self, event: &Event) {
        for msg in event {
            info!("{msg}");

            if event.event_type() == EventType::SessionStatus {
                if msg.message_type() == SESSION_TERMINATED {
                    self.state.stop_running();
                }
                continue;
            }

            for cid in msg.correlation_ids() {
                let authorized = msg.message_type() == AUTHORIZATION_SUCCESS;
                if self.state.resolve_authorization(cid, authorized) {
                    debug!("authorization {cid} resolved: authorized={authorized}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AuthorizationStatus;
    use contrib_core::names::{AUTHORIZATION_FAILURE, SESSION_STARTED};
    use contrib_core::{CorrelationId, Message};

    fn setup() -> (PublisherEventHandler, Arc<SharedState>, CorrelationId) {
        let state = Arc::new(SharedState::new());
        let cid = CorrelationId::from("auth");
        state.begin_authorization(cid.clone());
        (PublisherEventHandler::new(state.clone()), state, cid)
    }

    #[test]
    fn session_terminated_clears_running() {
        let (handler, state, _) = setup();

        handler.handle(&Event::single(EventType::SessionStatus, Message::new(SESSION_STARTED)));
        assert!(state.is_running());

        handler.handle(&Event::single(
            EventType::SessionStatus,
            Message::new(SESSION_TERMINATED),
        ));
        assert!(!state.is_running());
    }

    #[test]
    fn session_status_never_touches_authorization() {
        let (handler, state, cid) = setup();

        // даже с correlation id статус сессии авторизацию не закрывает
        handler.handle(&Event::single(
            EventType::SessionStatus,
            Message::new(SESSION_TERMINATED).with_correlation_id(cid.clone()),
        ));
        assert_eq!(state.authorization_status(&cid), Some(AuthorizationStatus::Waiting));
    }

    #[test]
    fn authorization_success_and_failure() {
        let (handler, state, cid) = setup();
        handler.handle(&Event::single(
            EventType::Response,
            Message::new(AUTHORIZATION_SUCCESS).with_correlation_id(cid.clone()),
        ));
        assert_eq!(state.authorization_status(&cid), Some(AuthorizationStatus::Authorized));

        let (handler, state, cid) = setup();
        handler.handle(&Event::single(
            EventType::Response,
            Message::new(AUTHORIZATION_FAILURE).with_correlation_id(cid.clone()),
        ));
        assert_eq!(state.authorization_status(&cid), Some(AuthorizationStatus::Failed));
    }

    #[test]
    fn late_event_does_not_flip_terminal_status() {
        let (handler, state, cid) = setup();
        for ty in [AUTHORIZATION_FAILURE, AUTHORIZATION_SUCCESS] {
            handler.handle(&Event::single(
                EventType::Response,
                Message::new(ty).with_correlation_id(cid.clone()),
            ));
        }
        assert_eq!(state.authorization_status(&cid), Some(AuthorizationStatus::Failed));
    }

    #[test]
    fn unrelated_correlation_ids_are_ignored() {
        let (handler, state, cid) = setup();
        handler.handle(&Event::single(
            EventType::TopicStatus,
            Message::new("TopicCreated").with_correlation_id(CorrelationId::Int(0)),
        ));
        assert_eq!(state.authorization_status(&cid), Some(AuthorizationStatus::Waiting));
        assert_eq!(state.authorization_status(&CorrelationId::Int(0)), None);
    }
}
