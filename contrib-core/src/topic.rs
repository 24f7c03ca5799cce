use std::fmt;

use crate::event::CorrelationId;

/// Непрозрачный хэндл топика, которым помечаются публикуемые сообщения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Topic(u64);

impl Topic {
    /// Хэндл из id, выданного транспортом
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Id хэндла
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Статус создания топика
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStatus {
    /// ещё не обрабатывался
    NotCreated,
    /// создан, хэндл доступен
    Created,
    /// создать не удалось
    Failure,
}

impl fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TopicStatus::NotCreated => "NOT_CREATED",
            TopicStatus::Created => "CREATED",
            TopicStatus::Failure => "FAILURE",
        };
        f.write_str(s)
    }
}

/// Как поступать с сервисами при создании топиков
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// регистрировать сервис топика автоматически
    AutoRegisterServices,
    /// сервис должен быть зарегистрирован заранее
    DontRegisterServices,
}

/// Запись в списке топиков
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicEntry {
    topic_string: String,
    correlation_id: CorrelationId,
    status: TopicStatus,
    topic: Option<Topic>,
    reason: Option<String>,
}

impl TopicEntry {
    /// Полная строка топика, с сервисом
    pub fn topic_string(&self) -> &str {
        &self.topic_string
    }

    /// Correlation id записи
    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    /// Статус
    pub fn status(&self) -> TopicStatus {
        self.status
    }

    /// Хэндл, если топик создан
    pub fn topic(&self) -> Option<Topic> {
        self.topic
    }

    /// Причина отказа, если есть
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Отметить как созданный
    pub fn mark_created(&mut self, topic: Topic) {
        self.status = TopicStatus::Created;
        self.topic = Some(topic);
        self.reason = None;
    }

    /// Отметить как неудачный
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = TopicStatus::Failure;
        self.topic = None;
        self.reason = Some(reason.into());
    }
}

/// Список топиков на создание; `create_topics` заполняет статусы на месте
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicList {
    entries: Vec<TopicEntry>,
}

impl TopicList {
    /// Пустой список
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить топик
    pub fn add(&mut self, topic_string: impl Into<String>, correlation_id: CorrelationId) {
        self.entries.push(TopicEntry {
            topic_string: topic_string.into(),
            correlation_id,
            status: TopicStatus::NotCreated,
            topic: None,
            reason: None,
        });
    }

    /// Количество записей
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Пуст ли список
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Записи
    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    /// Записи для изменения транспортом
    pub fn entries_mut(&mut self) -> &mut [TopicEntry] {
        &mut self.entries
    }
}

/// Сервис из полной строки топика: `//blp/mpfbapi/ticker/X` -> `//blp/mpfbapi`
pub fn service_of(topic_string: &str) -> Option<&str> {
    let rest = topic_string.strip_prefix("//")?;
    let mut slashes = rest.match_indices('/').map(|(i, _)| i);
    let _namespace_end = slashes.next()?;
    match slashes.next() {
        Some(end) => Some(&topic_string[..end + 2]),
        None => Some(topic_string),
    }
}
