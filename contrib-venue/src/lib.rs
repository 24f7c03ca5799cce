//! # contrib-venue
//!
//! Площадка-симулятор в том же процессе. Реализует трейты транспорта из
//! `contrib-core`, чтобы contrib-publisher можно было запускать и тестировать
//! без настоящей площадки.
//!
//! - события доставляются отдельным потоком (`venue-dispatch`) через очередь
//! - токены случайные, авторизация проходит только с токеном этой же сессии
//! - всё опубликованное складывается в [`PublishLedger`]
//! - поведение (отказы, тишина, обрыв сессии) задаётся [`VenueBehavior`]
//!
//! ```rust
//! use std::sync::Arc;
//! use contrib_core::{AuthOptions, Event, EventHandler, Session, SessionConfig, Transport};
//! use contrib_venue::{VenueBehavior, VenueTransport};
//!
//! struct Quiet;
//! impl EventHandler for Quiet {
//!     fn handle(&self, _event: &Event) {}
//! }
//!
//! let transport = VenueTransport::new(VenueBehavior::default());
//! let config = SessionConfig::standard(&[], 8194, AuthOptions::None, None);
//! let session = transport.connect(&config, Arc::new(Quiet)).unwrap();
//! assert!(session.open_service("//blp/mpfbapi"));
//! session.stop();
//! assert!(transport.ledger().is_empty());
//! ```

#![forbid(unsafe_code)]

mod behavior;
mod dispatch;
mod ledger;
mod session;

pub use behavior::{AuthorizationReply, TokenReply, VenueBehavior};
pub use ledger::PublishLedger;
pub use session::{VenueSession, VenueTransport};
