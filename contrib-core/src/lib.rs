//! # contrib-core
//!
//! Базовые типы для публикации рыночных данных на площадку
//! (contrib-publisher) и для симулятора площадки (contrib-venue).
//!
//! Этот крейт содержит:
//!
//! - [`auth`]: режимы аутентификации и их строковое представление для транспорта
//! - [`tls`]: TLS-материал (пути к файлам или их содержимое)
//! - [`config`]: неизменяемая конфигурация сессии (адреса или выделенная линия)
//! - [`event`]: события, сообщения, correlation id
//! - [`topic`]: список топиков и статусы их создания
//! - [`publish`]: публикуемое событие и форматтер
//! - [`transport`]: трейты транспорта: `Transport`, `Session`, `EventHandler`
//! - [`error`]: типы ошибок
//!
//! ## Пример: опция `--auth`
//!
//! ```rust
//! use contrib_core::AuthOptions;
//!
//! let auth: AuthOptions = "app=blp:Contrib".parse().unwrap();
//! assert_eq!(
//!     auth.to_wire().unwrap(),
//!     "AuthenticationMode=APPLICATION_ONLY;\
//!      ApplicationAuthenticationType=APPNAME_AND_KEY;ApplicationName=blp:Contrib"
//! );
//! assert!("bogus".parse::<AuthOptions>().is_err());
//! ```
//!
//! ## Пример: выделенная линия
//!
//! ```rust
//! use contrib_core::{AuthOptions, ConfigError, SessionConfig, TlsOptions};
//!
//! let tls = TlsOptions::from_files("client.p12", "", "trust.p7");
//! let err = SessionConfig::build(&[], 8194, Some(8195), AuthOptions::None, Some(tls))
//!     .unwrap_err();
//! assert!(matches!(err, ConfigError::InvalidLeasedLinePort(8195)));
//! ```
//!
//! ## Пример: публикуемое событие
//!
//! ```rust
//! use contrib_core::names::{ASK, BID, MARKET_DATA};
//! use contrib_core::{EventFormatter, Service, Topic};
//!
//! let service = Service::new("//blp/mpfbapi");
//! let mut event = service.create_publish_event();
//! let mut fmt = EventFormatter::new(&mut event);
//! fmt.append_message(MARKET_DATA, Topic::new(1));
//! fmt.set_element(BID, 1.0).unwrap();
//! fmt.set_element(ASK, 2.0).unwrap();
//!
//! assert_eq!(event.messages()[0].element_as_f64(ASK), Some(2.0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Режимы аутентификации.
pub mod auth;

/// Конфигурация сессии.
pub mod config;

/// Ошибки `contrib-core`.
pub mod error;

/// События и сообщения транспорта.
pub mod event;

/// Имена типов сообщений и полей.
pub mod names;

/// Публикуемые события.
pub mod publish;

/// TLS-параметры.
pub mod tls;

/// Топики.
pub mod topic;

/// Трейты транспорта.
pub mod transport;

/// Общие константы
mod constants;
pub use constants::{
    AUTH_SERVICE, AUTHORIZATION_POLL_INTERVAL, AUTHORIZATION_TIMEOUT, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_SERVICE, DEFAULT_TOPIC, PUBLISH_INTERVAL,
};

// --- Re-exports (публичный фасад API) ---

pub use crate::auth::AuthOptions;
pub use crate::config::{ServerAddress, ServerRoute, SessionConfig, ZfpRemote};
pub use crate::error::{ConfigError, CoreError, FormatError, TransportError};
pub use crate::event::{CorrelationId, Event, EventType, Message, Value};
pub use crate::publish::{EventFormatter, PublishEvent};
pub use crate::tls::{TlsOptions, TlsSource};
pub use crate::topic::{ResolveMode, Topic, TopicEntry, TopicList, TopicStatus};
pub use crate::transport::{AuthorizationRequest, EventHandler, Identity, Service, Session, Transport};
