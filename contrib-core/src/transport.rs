//! Граница с транспортом площадки.
//!
//! Сам протокол, очередь событий и кодирование сообщений живут в
//! реализации транспорта. Оркестратор работает только через эти трейты.

use std::sync::Arc;

use crate::config::SessionConfig;
use crate::error::TransportError;
use crate::event::{CorrelationId, Event};
use crate::names::TOKEN;
use crate::publish::PublishEvent;
use crate::topic::{ResolveMode, TopicList};

/// Обработчик входящих событий.
///
/// Вызывается в потоке доставки, который принадлежит транспорту.
pub trait EventHandler: Send + Sync {
    /// Обработать событие
    fn handle(&self, event: &Event);
}

/// Фабрика сессий
pub trait Transport {
    /// Тип сессии
    type Session: Session;

    /// Поднимает сессию и регистрирует обработчик событий
    fn connect(
        &self,
        config: &SessionConfig,
        handler: Arc<dyn EventHandler>,
    ) -> Result<Self::Session, TransportError>;
}

/// Поднятая сессия
pub trait Session {
    /// Открыть сервис; `false`, если недоступен
    fn open_service(&self, name: &str) -> bool;

    /// Хэндл открытого или зарегистрированного сервиса
    fn get_service(&self, name: &str) -> Option<Service>;

    /// Запросить токен и дождаться ровно одного события с результатом
    fn generate_token(&self) -> Result<Event, TransportError>;

    /// Новая (ещё не авторизованная) identity
    fn create_identity(&self) -> Identity;

    /// Отправить запрос авторизации; ответ придёт через обработчик событий
    fn send_authorization_request(
        &self,
        request: &AuthorizationRequest,
        identity: &Identity,
        correlation_id: CorrelationId,
    ) -> Result<(), TransportError>;

    /// Синхронно создать топики; статусы и хэндлы пишутся в `topics`
    fn create_topics(
        &self,
        topics: &mut TopicList,
        mode: ResolveMode,
        identity: &Identity,
    ) -> Result<(), TransportError>;

    /// Опубликовать событие
    fn publish(&self, event: &PublishEvent) -> Result<(), TransportError>;

    /// Остановить сессию
    fn stop(&self);
}

/// Хэндл сервиса
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    name: String,
}

impl Service {
    /// Хэндл по имени сервиса
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Имя сервиса
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Пустое событие на публикацию в этот сервис
    pub fn create_publish_event(&self) -> PublishEvent {
        PublishEvent::new(self.name.clone())
    }

    /// Пустой запрос авторизации
    pub fn create_authorization_request(&self) -> AuthorizationRequest {
        AuthorizationRequest { token: None }
    }
}

/// Запрос авторизации
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    token: Option<String>,
}

impl AuthorizationRequest {
    /// Установить поле запроса. Сейчас поддерживается только `token`.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        if name == TOKEN {
            self.token = Some(value.into());
        }
    }

    /// Токен
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Контекст авторизации; заполняется транспортом после успешной авторизации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity(u64);

impl Identity {
    /// Identity с id, выданным транспортом
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Id
    pub fn id(self) -> u64 {
        self.0
    }
}
