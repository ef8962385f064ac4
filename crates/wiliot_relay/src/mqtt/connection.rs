use crate::domain::{ConnectionObserver, RelayConfig};
use rumqttc::{Event, EventLoop, MqttOptions, Packet, Transport};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

pub const WILIOT_CLOUD_HOST: &str = "mqttv2.wiliot.com";
pub const WILIOT_CLOUD_PORT: u16 = 8883;

const KEEP_ALIVE: Duration = Duration::from_secs(30);

// Pacing between polls after a transport error. Reconnection itself is the
// transport's job; this only keeps the driver from spinning while the
// broker is unreachable.
const ERROR_POLL_DELAY: Duration = Duration::from_secs(1);

/// Build the MQTT options for the Wiliot Cloud broker
///
/// Authenticates with the owner ID as principal and the access token as
/// credential, over TLS.
pub fn mqtt_options(config: &RelayConfig) -> MqttOptions {
    let client_id = format!("wiliot-relay-{}", config.gateway_id);
    let mut options = MqttOptions::new(client_id, WILIOT_CLOUD_HOST, WILIOT_CLOUD_PORT);
    options.set_credentials(&config.owner_id, &config.access_token);
    options.set_keep_alive(KEEP_ALIVE);
    options.set_transport(Transport::tls_with_default_config());
    options
}

/// Lifecycle events observed from the transport
///
/// The transport's full `Disconnected → Connecting → Connected` state
/// machine stays inside rumqttc; the bridge only sees these two.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TransportEvent {
    Connected,
    Error(String),
}

/// Forward a transport lifecycle event to the observer
///
/// Errors are surfaced only when `print_errors` is set; a suppressed error
/// is otherwise indistinguishable from a healthy connection, by contract.
pub(crate) fn observe_transport_event(
    event: &TransportEvent,
    observer: &dyn ConnectionObserver,
    print_errors: bool,
) {
    match event {
        TransportEvent::Connected => observer.on_connect(),
        TransportEvent::Error(error) => {
            if print_errors {
                observer.on_error(error);
            }
        }
    }
}

/// Drive the MQTT event loop until shutdown
///
/// Owns the connection for the lifetime of the bridge instance. Polling
/// the event loop is what makes rumqttc connect, keep the session alive,
/// flush queued publishes, and reconnect after failures; the bridge adds
/// no retry or backoff policy of its own.
#[instrument(name = "mqtt_connection", skip_all)]
pub async fn run_connection_driver(
    mut eventloop: EventLoop,
    observer: Arc<dyn ConnectionObserver>,
    print_errors: bool,
    shutdown_token: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown_token.cancelled() => {
                debug!("shutdown signal received, stopping connection driver");
                break;
            }
            event = eventloop.poll() => {
                match event {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        observe_transport_event(
                            &TransportEvent::Connected,
                            observer.as_ref(),
                            print_errors,
                        );
                    }
                    Ok(_) => {
                        // Outgoing packets, ping responses, etc.
                    }
                    Err(e) => {
                        observe_transport_event(
                            &TransportEvent::Error(e.to_string()),
                            observer.as_ref(),
                            print_errors,
                        );
                        tokio::select! {
                            _ = shutdown_token.cancelled() => break,
                            _ = tokio::time::sleep(ERROR_POLL_DELAY) => {}
                        }
                    }
                }
            }
        }
    }

    debug!("connection driver stopped");
}

/// Production observer: logs lifecycle events through tracing
pub struct LogConnectionObserver;

impl ConnectionObserver for LogConnectionObserver {
    fn on_connect(&self) {
        info!("connected to Wiliot Cloud MQTT broker");
    }

    fn on_error(&self, error: &str) {
        error!(error = %error, "MQTT connection error");
    }
}
