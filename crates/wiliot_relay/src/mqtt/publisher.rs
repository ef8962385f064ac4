use crate::domain::{DomainError, DomainResult, MessagePublisher};
use async_trait::async_trait;
use bytes::Bytes;
use rumqttc::{AsyncClient, QoS};
use tracing::debug;

/// MQTT publisher for outbound relay messages
///
/// Wraps the shared rumqttc client handle. Publishes at QoS 0: the message
/// is handed to the transport's event loop and forgotten, matching the
/// bridge's fire-and-forget contract.
pub struct MqttMessagePublisher {
    client: AsyncClient,
}

impl MqttMessagePublisher {
    pub fn new(client: AsyncClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessagePublisher for MqttMessagePublisher {
    async fn publish(&self, topic: &str, payload: Bytes) -> DomainResult<()> {
        debug!(
            topic = %topic,
            size_bytes = payload.len(),
            "handing message to MQTT transport"
        );

        self.client
            .publish_bytes(topic, QoS::AtMostOnce, false, payload)
            .await
            .map_err(|e| {
                DomainError::TransportError(anyhow::anyhow!("Failed to enqueue publish: {}", e))
            })
    }
}
