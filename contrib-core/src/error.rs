use std::path::PathBuf;

use thiserror::Error;

/// Верхнеуровневый тип ошибок крейта
#[derive(Debug, Error)]
pub enum CoreError {
    /// Ошибки конфигурации
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Ошибки транспорта
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Ошибки сборки публикуемого события
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Ошибки конфигурации: всё, что ловим до попытки подключения
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Нераспознанная опция `--auth`
    #[error("invalid auth option '{0}' (expected user|none|app=<app>|userapp=<app>|dir=<property>)")]
    InvalidAuthOption(String),

    /// Выделенная линия без TLS
    #[error("leased-line connections require TLS parameters")]
    LeasedLineRequiresTls,

    /// Порт выделенной линии не 8194 и не 8196
    #[error("invalid leased-line port: {0} (expected 8194 or 8196)")]
    InvalidLeasedLinePort(u16),

    /// Не удалось прочитать TLS-файл
    #[error("failed to read TLS file: {path:?}")]
    ReadTlsFile {
        /// путь к файлу
        path: PathBuf,
        /// исходная ошибка
        #[source]
        source: std::io::Error,
    },
}

/// Ошибки транспорта
#[derive(Debug, Error)]
pub enum TransportError {
    /// Сессию не удалось поднять
    #[error("failed to start session: {0}")]
    StartFailed(String),

    /// Публикация в незарегистрированный сервис
    #[error("service not registered: {0}")]
    ServiceNotRegistered(String),

    /// Публикация в неизвестный топик
    #[error("unknown topic handle: {0}")]
    UnknownTopic(u64),

    /// Сессия уже остановлена
    #[error("session stopped")]
    SessionStopped,

    /// Очередь событий закрыта
    #[error("event queue closed")]
    Closed,
}

/// Ошибки форматтера событий
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// `set_element` до первого `append_message`
    #[error("no message appended yet")]
    NoMessage,
}
