use crate::domain::{DomainResult, MessagePublisher, OutboundMessage, RelayConfig};
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Event name acted on by the relay service
pub const RELAY_EVENT_NAME: &str = "relay";

/// Relay type accepted for forwarding to the Wiliot Cloud
pub const WILIOT_RELAY_TYPE: &str = "wiliot";

/// Domain service that filters inbound relay events and republishes them
///
/// Flow:
/// 1. Dispatch on the event name; anything but `relay` is a no-op
/// 2. Filter on the relay type tag; anything but `wiliot` is discarded
/// 3. Build an OutboundMessage from config + a fresh timestamp
/// 4. Publish to the config's topic via the MessagePublisher trait
///
/// The upstream event bus multiplexes many relay types, so the filter must
/// be cheap to no-op on everything not destined for this integration.
pub struct RelayService {
    config: Arc<RelayConfig>,
    publisher: Arc<dyn MessagePublisher>,
}

impl RelayService {
    pub fn new(config: Arc<RelayConfig>, publisher: Arc<dyn MessagePublisher>) -> Self {
        debug!(
            topic = %config.topic(),
            gateway_id = %config.gateway_id,
            "initialized RelayService"
        );

        Self { config, publisher }
    }

    /// Handle an event from the upstream bus
    ///
    /// Returns nothing to the caller; the only side effect is at most one
    /// publish call. Publish failures are logged, never propagated.
    #[instrument(skip_all, fields(event = %name))]
    pub async fn handle_event(&self, name: &str, data: &serde_json::Value) {
        match name {
            RELAY_EVENT_NAME => self.handle_relay(data).await,
            _ => {}
        }
    }

    /// Forward accepted relay data to the Wiliot Cloud
    async fn handle_relay(&self, relay: &serde_json::Value) {
        // Intentional silent discard: absent or mismatched type tags are
        // other integrations' traffic, not errors.
        let accepted = relay
            .get("type")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|relay_type| relay_type == WILIOT_RELAY_TYPE);
        if !accepted {
            return;
        }

        let payload = relay
            .get("payload")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        let message = OutboundMessage::from_relay_payload(&self.config, payload);

        // Fire-and-forget: the transport reports delivery outcomes through
        // its own lifecycle events, decoupled from this call.
        if let Err(e) = self.forward(&message).await {
            error!(
                topic = %self.config.topic(),
                error = %e,
                "failed to publish relay message"
            );
        } else {
            debug!(
                topic = %self.config.topic(),
                packets = message.packets.len(),
                "published relay message"
            );
        }
    }

    /// Serialize and hand the message to the transport
    async fn forward(&self, message: &OutboundMessage) -> DomainResult<()> {
        let body = serde_json::to_vec(message)?;
        self.publisher.publish(self.config.topic(), body.into()).await
    }
}
