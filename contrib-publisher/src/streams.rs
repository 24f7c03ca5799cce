use contrib_core::{
    CorrelationId, Identity, ResolveMode, Session, Topic, TopicList, TopicStatus, TransportError,
};
use log::{info, warn};

/// Поток публикации: топик, который удалось создать
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Stream {
    pub(crate) id: String,
    pub(crate) topic: Topic,
}

/// Создаёт все топики одной пачкой и оставляет только созданные.
///
/// `topics`: топики без сервиса, например `/ticker/AUDEUR Curncy`.
pub(crate) fn resolve_streams<S: Session>(
    session: &S,
    service: &str,
    topics: &[String],
    identity: &Identity,
) -> Result<Vec<Stream>, TransportError> {
    let mut list = TopicList::new();
    for (idx, topic) in topics.iter().enumerate() {
        list.add(format!("{service}{topic}"), CorrelationId::Int(idx as u64));
    }

    // create_topics синхронный: по возврату статусы уже проставлены
    session.create_topics(&mut list, ResolveMode::AutoRegisterServices, identity)?;

    let mut streams = Vec::with_capacity(list.len());
    for entry in list.entries() {
        let id = stream_id(entry.correlation_id(), topics);

        match (entry.status(), entry.topic()) {
            (TopicStatus::Created, Some(topic)) => {
                info!("stream '{id}': topic created ({topic})");
                streams.push(Stream { id, topic });
            }
            (status, _) => {
                warn!(
                    "stream '{id}': topic not resolved, status = {status}{}",
                    entry
                        .reason()
                        .map(|r| format!(" ({r})"))
                        .unwrap_or_default()
                );
            }
        }
    }

    Ok(streams)
}

fn stream_id(cid: &CorrelationId, topics: &[String]) -> String {
    match cid {
        CorrelationId::Int(idx) => topics
            .get(*idx as usize)
            .cloned()
            .unwrap_or_else(|| cid.to_string()),
        CorrelationId::Name(name) => name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::PublisherEventHandler;
    use crate::state::SharedState;
    use contrib_core::{AuthOptions, SessionConfig, Transport};
    use contrib_venue::{VenueBehavior, VenueTransport};
    use std::sync::Arc;

    fn resolve(rejected: &[&str], topics: &[&str]) -> Vec<Stream> {
        let transport = VenueTransport::new(VenueBehavior {
            rejected_topics: rejected.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        });
        let config = SessionConfig::standard(&[], 8194, AuthOptions::None, None);
        let session = transport
            .connect(
                &config,
                Arc::new(PublisherEventHandler::new(Arc::new(SharedState::new()))),
            )
            .unwrap();

        let topics: Vec<String> = topics.iter().map(|s| s.to_string()).collect();
        let identity = session.create_identity();
        resolve_streams(&session, "//blp/mpfbapi", &topics, &identity).unwrap()
    }

    #[test]
    fn only_created_topics_become_streams() {
        let streams = resolve(
            &["/ticker/BAD"],
            &["/ticker/A", "/ticker/BAD", "/ticker/B"],
        );

        let ids: Vec<&str> = streams.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["/ticker/A", "/ticker/B"]);
        assert_ne!(streams[0].topic, streams[1].topic);
    }

    #[test]
    fn all_rejected_gives_no_streams() {
        let streams = resolve(&["/ticker/A", "/ticker/B"], &["/ticker/A", "/ticker/B"]);
        assert!(streams.is_empty());
    }

    #[test]
    fn stream_id_falls_back_to_correlation_id() {
        let topics = vec!["/t/a".to_string()];
        assert_eq!(stream_id(&CorrelationId::Int(0), &topics), "/t/a");
        assert_eq!(stream_id(&CorrelationId::Int(9), &topics), "9");
        assert_eq!(stream_id(&CorrelationId::Name("x".into()), &topics), "x");
    }
}
