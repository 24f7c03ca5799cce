use std::fmt;

use crate::topic::Topic;

/// Связывает асинхронный запрос с ответными событиями
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CorrelationId {
    /// числовой id
    Int(u64),
    /// строковый id, например `"auth"`
    Name(String),
}

impl From<u64> for CorrelationId {
    fn from(v: u64) -> Self {
        CorrelationId::Int(v)
    }
}

impl From<&str> for CorrelationId {
    fn from(v: &str) -> Self {
        CorrelationId::Name(v.to_string())
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationId::Int(v) => write!(f, "{v}"),
            CorrelationId::Name(v) => write!(f, "{v:?}"),
        }
    }
}

/// Значение поля сообщения
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// строка
    Str(String),
    /// число с плавающей точкой
    Float(f64),
    /// целое
    Int(i64),
}

impl Value {
    /// Строка, если значение строковое
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Число, целые тоже приводятся к f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            Value::Str(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
        }
    }
}

/// Сообщение внутри события
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    message_type: String,
    correlation_ids: Vec<CorrelationId>,
    topic: Option<Topic>,
    elements: Vec<(String, Value)>,
}

impl Message {
    /// Пустое сообщение заданного типа
    pub fn new(message_type: impl Into<String>) -> Self {
        Self {
            message_type: message_type.into(),
            correlation_ids: Vec::new(),
            topic: None,
            elements: Vec::new(),
        }
    }

    /// Добавить correlation id
    pub fn with_correlation_id(mut self, cid: CorrelationId) -> Self {
        self.correlation_ids.push(cid);
        self
    }

    /// Привязать к топику
    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topic = Some(topic);
        self
    }

    /// Добавить поле
    pub fn with_element(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_element(name, value);
        self
    }

    /// Установить поле; если оно уже есть, значение заменяется
    pub fn set_element(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.elements.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.elements.push((name, value)),
        }
    }

    /// Тип сообщения
    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    /// Correlation id, к которым относится сообщение
    pub fn correlation_ids(&self) -> &[CorrelationId] {
        &self.correlation_ids
    }

    /// Топик, если сообщение публикуемое
    pub fn topic(&self) -> Option<Topic> {
        self.topic
    }

    /// Поле по имени
    pub fn element(&self, name: &str) -> Option<&Value> {
        self.elements.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Строковое поле по имени
    pub fn element_as_str(&self, name: &str) -> Option<&str> {
        self.element(name).and_then(Value::as_str)
    }

    /// Числовое поле по имени
    pub fn element_as_f64(&self, name: &str) -> Option<f64> {
        self.element(name).and_then(Value::as_f64)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.message_type)?;
        if let Some(topic) = self.topic {
            write!(f, " topic={topic}")?;
        }
        for cid in &self.correlation_ids {
            write!(f, " cid={cid}")?;
        }
        for (name, value) in &self.elements {
            write!(f, " {name} = {value}")?;
        }
        write!(f, " }}")
    }
}

/// Тип события транспорта
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// жизненный цикл сессии
    SessionStatus,
    /// открытие сервисов
    ServiceStatus,
    /// генерация токена
    TokenStatus,
    /// статус запроса
    RequestStatus,
    /// ответ на запрос (в т.ч. авторизация)
    Response,
    /// создание топиков
    TopicStatus,
    /// служебные
    Admin,
}

/// Событие: тип + пачка сообщений
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    event_type: EventType,
    messages: Vec<Message>,
}

impl Event {
    /// Событие из сообщений
    pub fn new(event_type: EventType, messages: Vec<Message>) -> Self {
        Self {
            event_type,
            messages,
        }
    }

    /// Событие из одного сообщения
    pub fn single(event_type: EventType, message: Message) -> Self {
        Self::new(event_type, vec![message])
    }

    /// Тип события
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Сообщения события
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Итератор по сообщениям
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a Event {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
