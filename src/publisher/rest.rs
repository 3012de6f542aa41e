use async_trait::async_trait;
use cloud_pubsub::{Client, Topic};

use super::{MessageId, Publisher};
use crate::error::PublishError;

const BINDING: &str = "apiary";

/// Publisher speaking the JSON REST API through `cloud-pubsub`.
///
/// The REST client serializes payloads as JSON strings before base64
/// encoding, so payloads are handed over as UTF-8 text.
pub struct RestPublisher {
    // keeps the token state alive for the topic handle
    _client: Client,
    topic: Topic,
}

impl RestPublisher {
    pub async fn connect(credentials_path: String, topic: &str) -> anyhow::Result<Self> {
        let client = Client::new(credentials_path)
            .await
            .map_err(|e| anyhow::anyhow!("failed to initialize REST pubsub client: {e:?}"))?;
        let topic = client.topic(topic.to_string());
        Ok(Self {
            _client: client,
            topic,
        })
    }
}

#[async_trait]
impl Publisher for RestPublisher {
    async fn publish(&self, payload: Vec<u8>) -> Result<MessageId, PublishError> {
        let text = String::from_utf8_lossy(&payload).into_owned();
        let response = self
            .topic
            .publish(text)
            .await
            .map_err(|e| PublishError::transport(BINDING, format!("{e:?}")))?;
        Ok(response.message_ids.into_iter().next().unwrap_or_default())
    }
}
