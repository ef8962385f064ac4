use crate::domain::{ConnectionObserver, RelayConfig, RelayOptions, RelayService};
use crate::mqtt::{mqtt_options, run_connection_driver, LogConnectionObserver, MqttMessagePublisher};
use rumqttc::AsyncClient;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

// Capacity of the channel between the client handle and the event loop.
// Messages beyond this are dropped by the transport, not queued by the
// bridge.
const CLIENT_CHANNEL_CAPACITY: usize = 100;

/// One-way bridge relaying event-bus payloads to the Wiliot Cloud
///
/// Owns the single outbound MQTT connection for its lifetime. Construction
/// wires the relay pipeline and spawns the connection driver; events are
/// fed in through [`handle_event`](Self::handle_event) and the connection
/// is released by [`shutdown`](Self::shutdown).
pub struct WiliotRelay {
    service: RelayService,
    client: AsyncClient,
    shutdown_token: CancellationToken,
    driver: JoinHandle<()>,
}

impl WiliotRelay {
    /// Create a bridge that logs lifecycle events through tracing
    ///
    /// Must be called from within a Tokio runtime; the connection driver
    /// is spawned onto it.
    pub fn new(options: RelayOptions) -> Self {
        Self::with_observer(options, Arc::new(LogConnectionObserver))
    }

    /// Create a bridge with an injected connection observer
    pub fn with_observer(options: RelayOptions, observer: Arc<dyn ConnectionObserver>) -> Self {
        let config = Arc::new(RelayConfig::new(options));

        let (client, eventloop) = AsyncClient::new(mqtt_options(&config), CLIENT_CHANNEL_CAPACITY);
        let shutdown_token = CancellationToken::new();
        let driver = tokio::spawn(run_connection_driver(
            eventloop,
            observer,
            config.print_errors,
            shutdown_token.clone(),
        ));

        let publisher = Arc::new(MqttMessagePublisher::new(client.clone()));
        let service = RelayService::new(Arc::clone(&config), publisher);

        info!(
            topic = %config.topic(),
            gateway_id = %config.gateway_id,
            "created Wiliot relay bridge"
        );

        Self {
            service,
            client,
            shutdown_token,
            driver,
        }
    }

    /// Handle an event from the upstream bus
    ///
    /// Only `relay` events carrying the accepted type tag result in a
    /// publish; everything else is a silent no-op.
    pub async fn handle_event(&self, name: &str, data: &serde_json::Value) {
        self.service.handle_event(name, data).await;
    }

    /// Tear down the bridge, releasing the outbound connection
    pub async fn shutdown(self) {
        info!("shutting down Wiliot relay bridge");

        self.shutdown_token.cancel();
        if let Err(e) = self.client.disconnect().await {
            // Already disconnected; nothing left to release.
            warn!(error = %e, "MQTT disconnect on shutdown failed");
        }
        let _ = self.driver.await;
    }
}
