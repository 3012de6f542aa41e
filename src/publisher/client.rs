use async_trait::async_trait;
use google_cloud_googleapis::pubsub::v1::PubsubMessage;
use google_cloud_pubsub::client::Client;
use google_cloud_pubsub::publisher::{Awaiter, Publisher as TopicPublisher, PublisherConfig};
use google_cloud_pubsub::topic::Topic;

use super::{MessageId, Publisher};
use crate::error::PublishError;
use crate::variant::Binding;

/// How a message reaches the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispatch {
    /// Through the publisher's bundling queue, awaited via its `Awaiter`.
    Queued,
    /// One `Publish` RPC per message on the generated publisher client.
    Immediate,
}

impl Dispatch {
    fn for_binding(binding: Binding) -> Self {
        match binding {
            Binding::Gapic => Dispatch::Immediate,
            Binding::Apiary | Binding::ClientLibrary => Dispatch::Queued,
        }
    }
}

/// Publisher built on the gRPC client library.
pub struct ClientPublisher {
    binding: &'static str,
    dispatch: Dispatch,
    publisher: TopicPublisher,
}

impl ClientPublisher {
    /// Connects one client for `topic`, creating the topic first when
    /// `ensure_topic` is set.
    pub async fn connect(
        binding: Binding,
        topic: &str,
        ensure_topic: bool,
    ) -> anyhow::Result<Self> {
        let client = Client::default().await?;
        let topic = client.topic(topic);
        if ensure_topic {
            create_if_missing(&topic).await?;
        }
        // one message per bundle, like BatchSettings(max_messages=1)
        let config = PublisherConfig {
            bundle_size: 1,
            ..PublisherConfig::default()
        };
        Ok(Self {
            binding: binding.as_str(),
            dispatch: Dispatch::for_binding(binding),
            publisher: topic.new_publisher(Some(config)),
        })
    }
}

#[async_trait]
impl Publisher for ClientPublisher {
    async fn publish(&self, payload: Vec<u8>) -> Result<MessageId, PublishError> {
        let message = PubsubMessage {
            data: payload.into(),
            ..PubsubMessage::default()
        };
        let result = match self.dispatch {
            Dispatch::Queued => {
                let awaiter: Awaiter = self.publisher.publish(message).await;
                awaiter.get(None).await
            }
            Dispatch::Immediate => self
                .publisher
                .publish_immediately(vec![message], None, None)
                .await
                .map(first_message_id),
        };
        result.map_err(|status| PublishError::transport(self.binding, status.to_string()))
    }
}

/// Creates `topic` unless it already exists, on a client of its own.
pub async fn ensure_topic(topic: &str) -> anyhow::Result<()> {
    let client = Client::default().await?;
    create_if_missing(&client.topic(topic)).await
}

async fn create_if_missing(topic: &Topic) -> anyhow::Result<()> {
    if !topic.exists(None, None).await? {
        topic.create(None, None, None).await?;
        tracing::info!(topic = %topic.fully_qualified_name(), "created topic");
    }
    Ok(())
}

/// An empty response yields an empty id, which the harness rejects.
fn first_message_id(message_ids: Vec<String>) -> MessageId {
    message_ids.into_iter().next().unwrap_or_default()
}
