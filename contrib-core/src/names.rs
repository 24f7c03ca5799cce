//! Имена типов сообщений и полей, которыми обмениваются с транспортом.

/// Токен успешно сгенерирован
pub const TOKEN_SUCCESS: &str = "TokenGenerationSuccess";
/// Генерация токена не удалась
pub const TOKEN_FAILURE: &str = "TokenGenerationFailure";
/// Авторизация прошла
pub const AUTHORIZATION_SUCCESS: &str = "AuthorizationSuccess";
/// Авторизация отклонена
pub const AUTHORIZATION_FAILURE: &str = "AuthorizationFailure";
/// Сессия поднята
pub const SESSION_STARTED: &str = "SessionStarted";
/// Сессия завершена
pub const SESSION_TERMINATED: &str = "SessionTerminated";
/// Сервис открыт
pub const SERVICE_OPENED: &str = "ServiceOpened";
/// Сообщение с рыночными данными
pub const MARKET_DATA: &str = "MarketData";

/// Поле с токеном
pub const TOKEN: &str = "token";
/// Цена bid
pub const BID: &str = "BID";
/// Цена ask
pub const ASK: &str = "ASK";
/// Поле с текстом причины отказа
pub const REASON: &str = "reason";
