use std::time::Duration;

/// Хост по умолчанию, если `--ip` не задан
pub const DEFAULT_HOST: &str = "localhost";

/// Порт по умолчанию
pub const DEFAULT_PORT: u16 = 8194;

/// Сервис публикации по умолчанию
pub const DEFAULT_SERVICE: &str = "//blp/mpfbapi";

/// Топик по умолчанию
pub const DEFAULT_TOPIC: &str = "/ticker/AUDEUR Curncy";

/// Сервис авторизации
pub const AUTH_SERVICE: &str = "//blp/apiauth";

/// Сколько ждём ответа на запрос авторизации
pub const AUTHORIZATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Шаг опроса статуса авторизации
pub const AUTHORIZATION_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Пауза между публикациями
pub const PUBLISH_INTERVAL: Duration = Duration::from_secs(10);
