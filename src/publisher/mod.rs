//! Transport bindings behind a single awaited `publish` call.
//!
//! The batching client hands back a completion handle; bindings await it
//! before returning so callers only ever see a finished publish.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::PublishError;
use crate::variant::Binding;

mod client;
mod rest;

pub use client::{ensure_topic, ClientPublisher};
pub use rest::RestPublisher;

/// Identifier the service assigned to a published message.
pub type MessageId = String;

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publishes one message and resolves once the service has acknowledged it.
    async fn publish(&self, payload: Vec<u8>) -> Result<MessageId, PublishError>;
}

/// Connects the binding selected by `config`. Called once per process.
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn Publisher>> {
    let topic = config.topic();
    let publisher: Arc<dyn Publisher> = match config.binding {
        Binding::Apiary => {
            let credentials = config
                .google_application_credentials
                .clone()
                .ok_or_else(|| anyhow::anyhow!("apiary binding needs a credentials file"))?;
            // the REST client has no admin calls, so provisioning goes over gRPC
            if config.ensure_topic {
                ensure_topic(topic).await?;
            }
            Arc::new(RestPublisher::connect(credentials, topic).await?)
        }
        Binding::ClientLibrary | Binding::Gapic => Arc::new(
            ClientPublisher::connect(config.binding, topic, config.ensure_topic).await?,
        ),
    };
    tracing::info!(
        binding = config.binding.as_str(),
        topic = %config.topic_path(),
        "publisher connected"
    );
    Ok(publisher)
}
