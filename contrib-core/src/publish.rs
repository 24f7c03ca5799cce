use crate::error::FormatError;
use crate::event::{Message, Value};
use crate::topic::Topic;

/// Событие на публикацию: сообщения для одного сервиса
#[derive(Debug, Clone, PartialEq)]
pub struct PublishEvent {
    service: String,
    messages: Vec<Message>,
}

impl PublishEvent {
    /// Пустое событие для сервиса
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            messages: Vec::new(),
        }
    }

    /// Сервис, в который публикуем
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Сообщения
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Пустое ли событие
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Дописывает сообщения в [`PublishEvent`].
///
/// `set_element` всегда относится к последнему добавленному сообщению.
pub struct EventFormatter<'a> {
    event: &'a mut PublishEvent,
}

impl<'a> EventFormatter<'a> {
    /// Форматтер поверх события
    pub fn new(event: &'a mut PublishEvent) -> Self {
        Self { event }
    }

    /// Начать новое сообщение для топика
    pub fn append_message(&mut self, message_type: &str, topic: Topic) {
        self.event
            .messages
            .push(Message::new(message_type).with_topic(topic));
    }

    /// Установить поле текущего сообщения
    pub fn set_element(&mut self, name: &str, value: impl Into<Value>) -> Result<(), FormatError> {
        let msg = self.event.messages.last_mut().ok_or(FormatError::NoMessage)?;
        msg.set_element(name, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::{ASK, BID, MARKET_DATA};

    #[test]
    fn set_element_before_append_fails() {
        let mut ev = PublishEvent::new("//svc/x");
        let mut fmt = EventFormatter::new(&mut ev);
        assert_eq!(fmt.set_element(BID, 1.0), Err(FormatError::NoMessage));
        assert!(ev.is_empty());
    }

    #[test]
    fn elements_go_to_last_message() {
        let mut ev = PublishEvent::new("//svc/x");
        {
            let mut fmt = EventFormatter::new(&mut ev);
            fmt.append_message(MARKET_DATA, Topic::new(1));
            fmt.set_element(BID, 1.0).unwrap();
            fmt.append_message(MARKET_DATA, Topic::new(2));
            fmt.set_element(ASK, 4.0).unwrap();
        }

        assert_eq!(ev.service(), "//svc/x");
        assert_eq!(ev.messages().len(), 2);

        let first = &ev.messages()[0];
        assert_eq!(first.topic(), Some(Topic::new(1)));
        assert_eq!(first.element_as_f64(BID), Some(1.0));
        assert_eq!(first.element_as_f64(ASK), None);

        let second = &ev.messages()[1];
        assert_eq!(second.topic(), Some(Topic::new(2)));
        assert_eq!(second.element_as_f64(ASK), Some(4.0));
    }
}
