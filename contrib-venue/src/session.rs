use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use contrib_core::names::{
    AUTHORIZATION_FAILURE, AUTHORIZATION_SUCCESS, REASON, SERVICE_OPENED, SESSION_STARTED,
    SESSION_TERMINATED, TOKEN, TOKEN_FAILURE, TOKEN_SUCCESS,
};
use contrib_core::topic::service_of;
use contrib_core::{
    AUTH_SERVICE, AuthorizationRequest, CorrelationId, Event, EventHandler, EventType, Identity,
    Message, PublishEvent, ResolveMode, ServerRoute, Service, Session, SessionConfig, Topic,
    TopicList, Transport, TransportError,
};
use log::{debug, info, warn};
use rand::Rng;

use crate::behavior::{AuthorizationReply, TokenReply, VenueBehavior};
use crate::dispatch::Dispatcher;
use crate::ledger::PublishLedger;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    match m.lock() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Транспорт-симулятор: поднимает [`VenueSession`] в том же процессе
#[derive(Debug, Clone, Default)]
pub struct VenueTransport {
    behavior: VenueBehavior,
    ledger: PublishLedger,
}

impl VenueTransport {
    pub fn new(behavior: VenueBehavior) -> Self {
        Self {
            behavior,
            ledger: PublishLedger::new(),
        }
    }

    /// Журнал публикаций всех сессий этого транспорта
    pub fn ledger(&self) -> PublishLedger {
        self.ledger.clone()
    }
}

impl Transport for VenueTransport {
    type Session = VenueSession;

    fn connect(
        &self,
        config: &SessionConfig,
        handler: Arc<dyn EventHandler>,
    ) -> Result<VenueSession, TransportError> {
        if self.behavior.fail_start {
            return Err(TransportError::StartFailed("venue refused connection".into()));
        }

        match config.route() {
            ServerRoute::Direct(addrs) => {
                debug!("venue: accepting session ({} address(es))", addrs.len())
            }
            ServerRoute::LeasedLine(remote) => {
                debug!("venue: accepting leased-line session on {}", remote.port())
            }
        }

        let auth_options = config.auth().to_wire();
        match &auth_options {
            Some(wire) => debug!("venue: session auth options: {wire}"),
            None => debug!("venue: session without authentication"),
        }

        let dispatcher = Dispatcher::spawn(handler)?;
        let session = VenueSession {
            behavior: self.behavior.clone(),
            auth_options,
            dispatcher,
            ledger: self.ledger.clone(),
            services: Mutex::new(HashSet::new()),
            issued_tokens: Mutex::new(HashSet::new()),
            authorized: Mutex::new(HashSet::new()),
            topics: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            publishes: AtomicUsize::new(0),
            stopped: AtomicBool::new(false),
        };

        session.dispatcher.post(Event::single(
            EventType::SessionStatus,
            Message::new(SESSION_STARTED),
        ))?;

        Ok(session)
    }
}

/// Сессия симулятора площадки
pub struct VenueSession {
    behavior: VenueBehavior,
    // строка опций аутентификации в формате транспорта
    auth_options: Option<String>,
    dispatcher: Dispatcher,
    ledger: PublishLedger,
    services: Mutex<HashSet<String>>,
    issued_tokens: Mutex<HashSet<String>>,
    authorized: Mutex<HashSet<Identity>>,
    // id топика -> сервис
    topics: Mutex<HashMap<u64, String>>,
    next_id: AtomicU64,
    publishes: AtomicUsize,
    stopped: AtomicBool,
}

impl VenueSession {
    /// Опции аутентификации, с которыми открыта сессия
    pub fn auth_options(&self) -> Option<&str> {
        self.auth_options.as_deref()
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    fn terminate(&self, reason: &str) {
        let msg = Message::new(SESSION_TERMINATED).with_element(REASON, reason);
        self.notify(Event::single(EventType::SessionStatus, msg));
    }

    /// Событие без ответа вызывающему: после закрытия очереди просто теряется
    fn notify(&self, event: Event) {
        if let Err(e) = self.dispatcher.post(event) {
            debug!("venue: event dropped: {e}");
        }
    }

    /// Решение по запросу; identity запоминается только при выдаче доступа
    fn authorization_reply(
        &self,
        request: &AuthorizationRequest,
        identity: &Identity,
    ) -> Result<(), String> {
        if self.behavior.authorization_reply == AuthorizationReply::Deny {
            return Err("denied by venue".into());
        }

        let token = request.token().ok_or("request has no token")?;
        if !lock(&self.issued_tokens).contains(token) {
            return Err("unknown token".into());
        }
        lock(&self.authorized).insert(*identity);
        Ok(())
    }
}

impl Session for VenueSession {
    fn open_service(&self, name: &str) -> bool {
        if self.is_stopped() {
            return false;
        }
        if name == AUTH_SERVICE && self.behavior.auth_service_unavailable {
            warn!("venue: service {name} unavailable");
            return false;
        }

        lock(&self.services).insert(name.to_string());
        self.notify(Event::single(
            EventType::ServiceStatus,
            Message::new(SERVICE_OPENED).with_element("serviceName", name),
        ));
        true
    }

    fn get_service(&self, name: &str) -> Option<Service> {
        lock(&self.services)
            .contains(name)
            .then(|| Service::new(name))
    }

    fn generate_token(&self) -> Result<Event, TransportError> {
        if self.is_stopped() {
            return Err(TransportError::SessionStopped);
        }

        let msg = match self.behavior.token_reply {
            TokenReply::Refuse => {
                Message::new(TOKEN_FAILURE).with_element(REASON, "token generation refused")
            }
            TokenReply::Issue => {
                let token = format!("venue-{:016x}", rand::rng().random::<u64>());
                lock(&self.issued_tokens).insert(token.clone());
                Message::new(TOKEN_SUCCESS).with_element(TOKEN, token)
            }
        };

        Ok(Event::single(EventType::TokenStatus, msg))
    }

    fn create_identity(&self) -> Identity {
        Identity::new(self.next_id())
    }

    fn send_authorization_request(
        &self,
        request: &AuthorizationRequest,
        identity: &Identity,
        correlation_id: CorrelationId,
    ) -> Result<(), TransportError> {
        if self.is_stopped() {
            return Err(TransportError::SessionStopped);
        }

        // без ответа запрос ничего не решает
        if self.behavior.authorization_reply == AuthorizationReply::Silent {
            debug!("venue: swallowing authorization request {correlation_id}");
            return Ok(());
        }

        let msg = match self.authorization_reply(request, identity) {
            Ok(()) => Message::new(AUTHORIZATION_SUCCESS),
            Err(reason) => Message::new(AUTHORIZATION_FAILURE).with_element(REASON, reason),
        };

        self.dispatcher.post(Event::single(
            EventType::Response,
            msg.with_correlation_id(correlation_id),
        ))
    }

    fn create_topics(
        &self,
        topics: &mut TopicList,
        mode: ResolveMode,
        identity: &Identity,
    ) -> Result<(), TransportError> {
        if self.is_stopped() {
            return Err(TransportError::SessionStopped);
        }

        let identity_ok = self.auth_options.is_none() || lock(&self.authorized).contains(identity);
        let mut status_messages = Vec::with_capacity(topics.len());

        for entry in topics.entries_mut() {
            let Some(service) = service_of(entry.topic_string()).map(str::to_string) else {
                entry.mark_failed("malformed topic string");
                continue;
            };

            if mode == ResolveMode::AutoRegisterServices {
                lock(&self.services).insert(service.clone());
            }

            if !lock(&self.services).contains(&service) {
                entry.mark_failed(format!("service {service} not registered"));
            } else if !identity_ok {
                entry.mark_failed("identity not authorized");
            } else if self.behavior.rejects(entry.topic_string()) {
                entry.mark_failed("topic rejected by venue");
            } else {
                let id = self.next_id();
                lock(&self.topics).insert(id, service);
                entry.mark_created(Topic::new(id));
            }

            let msg = match entry.topic() {
                Some(topic) => Message::new("TopicCreated").with_topic(topic),
                None => Message::new("TopicCreateFailure")
                    .with_element(REASON, entry.reason().unwrap_or_default().to_string()),
            };
            status_messages.push(msg.with_correlation_id(entry.correlation_id().clone()));
        }

        self.notify(Event::new(EventType::TopicStatus, status_messages));
        Ok(())
    }

    fn publish(&self, event: &PublishEvent) -> Result<(), TransportError> {
        if self.is_stopped() {
            return Err(TransportError::SessionStopped);
        }
        if !lock(&self.services).contains(event.service()) {
            return Err(TransportError::ServiceNotRegistered(event.service().to_string()));
        }

        {
            let topics = lock(&self.topics);
            for msg in event.messages() {
                // id 0 никогда не выдаётся
                let id = msg.topic().map(Topic::id).unwrap_or(0);
                match topics.get(&id) {
                    Some(service) if service == event.service() => {}
                    _ => return Err(TransportError::UnknownTopic(id)),
                }
            }
        }

        let total = self.ledger.record(event.clone());
        let published = self.publishes.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("venue: accepted publish #{published} ({total} in ledger)");

        if self.behavior.terminate_after_publishes == Some(published) {
            info!("venue: closing session after {published} publishes");
            self.terminate("venue closed the session");
        }

        Ok(())
    }

    fn stop(&self) {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        self.terminate("session stopped");
        self.dispatcher.close();
    }
}

impl Drop for VenueSession {
    fn drop(&mut self) {
        self.stop();
    }
}
