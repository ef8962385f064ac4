#![cfg(feature = "testing")]

// Pipeline tests exercising the relay service against a mock transport.
// Run with: cargo test --features testing

use bytes::Bytes;
use serde_json::json;
use std::sync::Arc;
use wiliot_relay::{MockMessagePublisher, RelayConfig, RelayOptions, RelayService};

fn bridge_options() -> RelayOptions {
    RelayOptions {
        owner_id: "o1".to_string(),
        gateway_id: "g1".to_string(),
        access_token: "t".to_string(),
        gateway_type: None,
        gateway_name: None,
        print_errors: false,
    }
}

#[tokio::test]
async fn accepted_relay_event_is_republished_to_the_gateway_topic() {
    let mut mock_publisher = MockMessagePublisher::new();
    mock_publisher
        .expect_publish()
        .withf(|topic: &str, body: &Bytes| {
            let message: serde_json::Value = serde_json::from_slice(body).unwrap();
            let packets = message["packets"].as_array().unwrap();

            topic == "data-prod/o1/g1"
                && message["gatewayId"] == "g1"
                && message["gatewayType"] == "pareto-anywhere"
                && message["gatewayName"] == "ParetoAnywhere"
                && message["timestamp"].is_i64()
                && packets.len() == 1
                && packets[0]["timestamp"].is_i64()
                && packets[0]["payload"] == json!({"rssi": -70})
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let service = RelayService::new(
        Arc::new(RelayConfig::new(bridge_options())),
        Arc::new(mock_publisher),
    );

    service
        .handle_event("relay", &json!({"type": "wiliot", "payload": {"rssi": -70}}))
        .await;
}

#[tokio::test]
async fn foreign_relay_types_and_events_never_reach_the_transport() {
    let mut mock_publisher = MockMessagePublisher::new();
    mock_publisher.expect_publish().times(0);

    let service = RelayService::new(
        Arc::new(RelayConfig::new(bridge_options())),
        Arc::new(mock_publisher),
    );

    // Traffic for another integration on the same bus.
    service
        .handle_event("relay", &json!({"type": "other", "payload": {}}))
        .await;
    // Relay data with no type tag at all.
    service.handle_event("relay", &json!({"payload": {}})).await;
    // A different event name entirely.
    service
        .handle_event("raddec", &json!({"type": "wiliot", "payload": {}}))
        .await;
}

#[tokio::test]
async fn operator_supplied_gateway_identity_is_published_verbatim() {
    let mut mock_publisher = MockMessagePublisher::new();
    mock_publisher
        .expect_publish()
        .withf(|_topic: &str, body: &Bytes| {
            let message: serde_json::Value = serde_json::from_slice(body).unwrap();
            message["gatewayType"] == "custom-type" && message["gatewayName"] == "CustomName"
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let service = RelayService::new(
        Arc::new(RelayConfig::new(RelayOptions {
            gateway_type: Some("custom-type".to_string()),
            gateway_name: Some("CustomName".to_string()),
            ..bridge_options()
        })),
        Arc::new(mock_publisher),
    );

    service
        .handle_event("relay", &json!({"type": "wiliot", "payload": {}}))
        .await;
}
