use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use contrib_core::names::{TOKEN, TOKEN_FAILURE, TOKEN_SUCCESS};
use contrib_core::{
    AUTH_SERVICE, CorrelationId, Event, EventType, Identity, Service, Session, TransportError,
};
use log::{debug, info, warn};
use thiserror::Error;

use crate::state::{AuthorizationStatus, SharedState};

#[derive(Debug, Error)]
pub(crate) enum AuthorizationError {
    #[error("authorization service {0} is unavailable")]
    ServiceUnavailable(String),

    #[error("failed to get token")]
    TokenGeneration,

    #[error("authorization denied")]
    Denied,

    #[error("no authorization response within {0:?}")]
    TimedOut(Duration),

    #[error("authorization interrupted")]
    Interrupted,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Параметры ожидания ответа на авторизацию
#[derive(Debug, Clone, Copy)]
pub(crate) struct AuthorizationWait {
    pub(crate) timeout: Duration,
    pub(crate) poll_interval: Duration,
}

/// Авторизует `identity` через сервис авторизации.
///
/// Ответ приходит асинхронно через обработчик событий, здесь только
/// опрашиваем `state` до дедлайна или до `interrupted`.
pub(crate) fn authorize<S: Session>(
    session: &S,
    identity: &Identity,
    cid: CorrelationId,
    state: &SharedState,
    wait: AuthorizationWait,
    interrupted: &AtomicBool,
) -> Result<(), AuthorizationError> {
    if !session.open_service(AUTH_SERVICE) {
        return Err(AuthorizationError::ServiceUnavailable(AUTH_SERVICE.to_string()));
    }
    let service = session
        .get_service(AUTH_SERVICE)
        .ok_or_else(|| AuthorizationError::ServiceUnavailable(AUTH_SERVICE.to_string()))?;

    state.begin_authorization(cid.clone());
    let result = request_and_wait(session, &service, identity, &cid, state, wait, interrupted);
    state.forget_authorization(&cid);
    result
}

fn request_and_wait<S: Session>(
    session: &S,
    service: &Service,
    identity: &Identity,
    cid: &CorrelationId,
    state: &SharedState,
    wait: AuthorizationWait,
    interrupted: &AtomicBool,
) -> Result<(), AuthorizationError> {
    let token_event = session.generate_token()?;
    let token = extract_token(&token_event).ok_or(AuthorizationError::TokenGeneration)?;

    let mut request = service.create_authorization_request();
    request.set(TOKEN, token);

    session.send_authorization_request(&request, identity, cid.clone())?;

    let started = Instant::now();
    loop {
        match state.authorization_status(cid) {
            Some(AuthorizationStatus::Authorized) => {
                info!("authorization {cid} succeeded");
                return Ok(());
            }
            Some(AuthorizationStatus::Failed) => return Err(AuthorizationError::Denied),
            Some(AuthorizationStatus::Waiting) | None => {}
        }

        if interrupted.load(Ordering::Relaxed) {
            info!("authorization {cid}: interrupted");
            return Err(AuthorizationError::Interrupted);
        }

        if started.elapsed() > wait.timeout {
            warn!("authorization {cid}: no response in {:?}", wait.timeout);
            return Err(AuthorizationError::TimedOut(wait.timeout));
        }

        thread::sleep(wait.poll_interval);
    }
}

/// Токен из события генерации токена.
///
/// Смотрим только `TokenStatus`/`RequestStatus`; `TokenGenerationFailure`
/// прекращает разбор.
fn extract_token(event: &Event) -> Option<String> {
    if !matches!(
        event.event_type(),
        EventType::TokenStatus | EventType::RequestStatus
    ) {
        debug!("unexpected token event type: {:?}", event.event_type());
        return None;
    }

    for msg in event {
        info!("{msg}");
        match msg.message_type() {
            TOKEN_SUCCESS => return msg.element_as_str(TOKEN).map(str::to_string),
            TOKEN_FAILURE => break,
            _ => {}
        }
    }
    None
}
