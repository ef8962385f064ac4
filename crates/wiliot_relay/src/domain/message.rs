use crate::domain::RelayConfig;
use serde::Serialize;

/// One timestamped payload unit nested inside an outbound message
///
/// The payload is carried through as-is; the bridge does not validate its
/// shape beyond the relay type check upstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Packet {
    pub timestamp: i64,
    pub payload: serde_json::Value,
}

/// Message body published to the Wiliot Cloud ingestion topic
///
/// Built per accepted relay event and dropped after the publish call.
/// Field names follow the Wiliot wire schema (camelCase, epoch-ms
/// timestamps).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub gateway_id: String,
    pub gateway_type: String,
    pub gateway_name: String,
    pub timestamp: i64,
    pub packets: Vec<Packet>,
}

impl OutboundMessage {
    /// Build a message carrying a single relay payload
    ///
    /// Identity fields are copied from the bridge configuration; the
    /// timestamp is taken once and shared by the message and its packet.
    pub fn from_relay_payload(config: &RelayConfig, payload: serde_json::Value) -> Self {
        // TODO: use the timestamp from the relay data once upstream emits one
        let timestamp = chrono::Utc::now().timestamp_millis();

        Self {
            gateway_id: config.gateway_id.clone(),
            gateway_type: config.gateway_type.clone(),
            gateway_name: config.gateway_name.clone(),
            timestamp,
            packets: vec![Packet { timestamp, payload }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RelayOptions;
    use serde_json::json;

    fn config() -> RelayConfig {
        RelayConfig::new(RelayOptions {
            owner_id: "o1".to_string(),
            gateway_id: "g1".to_string(),
            access_token: "t".to_string(),
            gateway_type: None,
            gateway_name: None,
            print_errors: false,
        })
    }

    #[test]
    fn test_message_carries_exactly_one_packet() {
        let message = OutboundMessage::from_relay_payload(&config(), json!({"rssi": -70}));

        assert_eq!(message.packets.len(), 1);
        assert_eq!(message.packets[0].payload, json!({"rssi": -70}));
        assert_eq!(message.packets[0].timestamp, message.timestamp);
    }

    #[test]
    fn test_message_copies_gateway_identity_from_config() {
        let message = OutboundMessage::from_relay_payload(&config(), json!(null));

        assert_eq!(message.gateway_id, "g1");
        assert_eq!(message.gateway_type, "pareto-anywhere");
        assert_eq!(message.gateway_name, "ParetoAnywhere");
    }

    #[test]
    fn test_message_serializes_to_wire_schema() {
        let message = OutboundMessage::from_relay_payload(&config(), json!({"rssi": -70}));
        let body: serde_json::Value = serde_json::to_value(&message).unwrap();

        assert_eq!(body["gatewayId"], "g1");
        assert_eq!(body["gatewayType"], "pareto-anywhere");
        assert_eq!(body["gatewayName"], "ParetoAnywhere");
        assert!(body["timestamp"].is_i64());
        assert_eq!(body["packets"][0]["payload"]["rssi"], -70);
    }
}
