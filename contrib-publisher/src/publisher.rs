use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use contrib_core::names::{ASK, BID, MARKET_DATA};
use contrib_core::{
    AUTHORIZATION_POLL_INTERVAL, AUTHORIZATION_TIMEOUT, CorrelationId, EventFormatter, FormatError,
    PUBLISH_INTERVAL, ServerRoute, Service, Session, SessionConfig, Transport, TransportError,
};
use log::{debug, info};
use thiserror::Error;

use crate::authorize::{AuthorizationError, AuthorizationWait, authorize};
use crate::generator::QuoteGenerator;
use crate::guard::SessionGuard;
use crate::handler::PublisherEventHandler;
use crate::state::SharedState;
use crate::streams::{Stream, resolve_streams};

const SHUTDOWN_TICK: Duration = Duration::from_millis(200);

#[derive(Debug, Error)]
pub(crate) enum PublisherError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("publish service {0} is not available")]
    ServiceUnavailable(String),
}

/// Тайминги оркестратора
#[derive(Debug, Clone, Copy)]
pub(crate) struct PublisherSettings {
    pub(crate) auth_wait: AuthorizationWait,
    pub(crate) publish_interval: Duration,
    /// шаг, с которым пауза между публикациями проверяет флаги остановки
    pub(crate) tick: Duration,
}

impl Default for PublisherSettings {
    fn default() -> Self {
        Self {
            auth_wait: AuthorizationWait {
                timeout: AUTHORIZATION_TIMEOUT,
                poll_interval: AUTHORIZATION_POLL_INTERVAL,
            },
            publish_interval: PUBLISH_INTERVAL,
            tick: SHUTDOWN_TICK,
        }
    }
}

/// Что и куда публикуем
#[derive(Debug, Clone)]
pub(crate) struct PublishPlan {
    pub(crate) service: String,
    pub(crate) topics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StopReason {
    SessionTerminated,
    Interrupted,
}

/// Чем закончился прогон
#[derive(Debug)]
pub(crate) enum RunOutcome {
    StartFailed(TransportError),
    Unauthorized(AuthorizationError),
    NoActiveStreams,
    Finished { published: usize, reason: StopReason },
}

/// Оркестратор: подключение, авторизация, топики, цикл публикации.
pub(crate) struct Publisher {
    settings: PublisherSettings,
    state: Arc<SharedState>,
    interrupted: Arc<AtomicBool>,
}

impl Publisher {
    pub(crate) fn new(settings: PublisherSettings, interrupted: Arc<AtomicBool>) -> Self {
        Self {
            settings,
            state: Arc::new(SharedState::new()),
            interrupted,
        }
    }

    pub(crate) fn run<T: Transport>(
        &self,
        transport: &T,
        config: &SessionConfig,
        plan: &PublishPlan,
    ) -> Result<RunOutcome, PublisherError> {
        log_route(config);

        let handler = Arc::new(PublisherEventHandler::new(self.state.clone()));
        let session = match transport.connect(config, handler) {
            Ok(s) => SessionGuard::new(s),
            Err(e) => return Ok(RunOutcome::StartFailed(e)),
        };
        info!("session started");

        let identity = session.create_identity();

        if config.auth().requires_authorization() {
            info!("authorizing ({})", config.auth());
            match authorize(
                &*session,
                &identity,
                CorrelationId::from("auth"),
                &self.state,
                self.settings.auth_wait,
                &self.interrupted,
            ) {
                Ok(()) => {}
                Err(AuthorizationError::Interrupted) => return Ok(interrupted_early()),
                Err(e) => return Ok(RunOutcome::Unauthorized(e)),
            }
        }

        if self.interrupted.load(Ordering::Relaxed) {
            return Ok(interrupted_early());
        }

        let streams = resolve_streams(&*session, &plan.service, &plan.topics, &identity)?;
        if streams.is_empty() {
            return Ok(RunOutcome::NoActiveStreams);
        }

        let service = session
            .get_service(&plan.service)
            .ok_or_else(|| PublisherError::ServiceUnavailable(plan.service.clone()))?;

        let published = self.publish_loop(&*session, &service, &streams)?;

        let reason = if self.interrupted.load(Ordering::Relaxed) {
            StopReason::Interrupted
        } else {
            StopReason::SessionTerminated
        };

        Ok(RunOutcome::Finished { published, reason })
    }

    fn should_continue(&self) -> bool {
        !self.interrupted.load(Ordering::Relaxed) && self.state.is_running()
    }

    fn publish_loop<S: Session>(
        &self,
        session: &S,
        service: &Service,
        streams: &[Stream],
    ) -> Result<usize, PublisherError> {
        let mut generator = QuoteGenerator::new();
        let mut published = 0;

        info!("publishing {} stream(s) to {}", streams.len(), service.name());

        while !streams.is_empty() && self.should_continue() {
            let mut event = service.create_publish_event();
            {
                let mut fmt = EventFormatter::new(&mut event);
                for stream in streams {
                    let quote = generator.next_quote();
                    fmt.append_message(MARKET_DATA, stream.topic);
                    fmt.set_element(BID, quote.bid)?;
                    fmt.set_element(ASK, quote.ask)?;
                }
            }

            for msg in event.messages() {
                info!("{msg}");
            }

            session.publish(&event)?;
            published += 1;

            self.pause(self.settings.publish_interval);
        }

        debug!("publish loop finished after {published} event(s)");
        Ok(published)
    }

    /// Спим `interval`, но просыпаемся каждые `tick`, чтобы не пропустить остановку
    fn pause(&self, interval: Duration) {
        let tick = self.settings.tick.max(Duration::from_millis(1));
        let mut slept = Duration::ZERO;
        while slept < interval && self.should_continue() {
            let step = (interval - slept).min(tick);
            thread::sleep(step);
            slept += step;
        }
    }
}

fn interrupted_early() -> RunOutcome {
    info!("interrupted before publishing");
    RunOutcome::Finished {
        published: 0,
        reason: StopReason::Interrupted,
    }
}

fn log_route(config: &SessionConfig) {
    match config.route() {
        ServerRoute::Direct(addrs) => {
            for addr in addrs {
                info!("Connecting to port {} on {}", addr.port, addr.host);
            }
        }
        ServerRoute::LeasedLine(remote) => {
            info!(
                "Creating a ZFP connection for leased lines on port {}",
                remote.port()
            );
        }
    }
}
