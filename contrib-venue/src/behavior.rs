/// Что делать с запросом токена
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenReply {
    /// выдать случайный токен
    #[default]
    Issue,
    /// ответить `TokenGenerationFailure`
    Refuse,
}

/// Что делать с запросом авторизации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationReply {
    /// `AuthorizationSuccess`, если токен выдан этой же сессией
    #[default]
    Grant,
    /// всегда `AuthorizationFailure`
    Deny,
    /// не отвечать вообще
    Silent,
}

/// Поведение симулятора площадки. По умолчанию всё проходит успешно.
#[derive(Debug, Clone, Default)]
pub struct VenueBehavior {
    /// `connect` вернёт ошибку
    pub fail_start: bool,
    /// сервис авторизации не открывается
    pub auth_service_unavailable: bool,
    /// ответ на генерацию токена
    pub token_reply: TokenReply,
    /// ответ на авторизацию
    pub authorization_reply: AuthorizationReply,
    /// суффиксы топиков, которые площадка не создаёт
    pub rejected_topics: Vec<String>,
    /// после стольких публикаций площадка рвёт сессию
    pub terminate_after_publishes: Option<usize>,
}

impl VenueBehavior {
    pub(crate) fn rejects(&self, topic_string: &str) -> bool {
        self.rejected_topics
            .iter()
            .any(|suffix| topic_string.ends_with(suffix.as_str()))
    }
}
