use serde::Deserialize;

pub const TOPIC_ROOT: &str = "data-prod/";
pub const DEFAULT_GATEWAY_TYPE: &str = "pareto-anywhere";
pub const DEFAULT_GATEWAY_NAME: &str = "ParetoAnywhere";

/// Construction options for the relay bridge, as supplied by the operator
///
/// `owner_id` and `access_token` double as the MQTT username/password for
/// the Wiliot Cloud broker. Optional fields fall back to the platform
/// defaults when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayOptions {
    pub owner_id: String,
    pub gateway_id: String,
    pub access_token: String,
    #[serde(default)]
    pub gateway_type: Option<String>,
    #[serde(default)]
    pub gateway_name: Option<String>,
    #[serde(default)]
    pub print_errors: bool,
}

/// Immutable bridge configuration, computed once at construction
///
/// The outbound topic is derived here exactly once and never recomputed;
/// every message published by this bridge instance goes to the same topic.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub owner_id: String,
    pub gateway_id: String,
    pub access_token: String,
    pub gateway_type: String,
    pub gateway_name: String,
    pub print_errors: bool,
    topic: String,
}

impl RelayConfig {
    pub fn new(options: RelayOptions) -> Self {
        let topic = format!("{}{}/{}", TOPIC_ROOT, options.owner_id, options.gateway_id);

        Self {
            owner_id: options.owner_id,
            gateway_id: options.gateway_id,
            access_token: options.access_token,
            gateway_type: options
                .gateway_type
                .unwrap_or_else(|| DEFAULT_GATEWAY_TYPE.to_string()),
            gateway_name: options
                .gateway_name
                .unwrap_or_else(|| DEFAULT_GATEWAY_NAME.to_string()),
            print_errors: options.print_errors,
            topic,
        }
    }

    /// The outbound publish topic for this bridge instance
    pub fn topic(&self) -> &str {
        &self.topic
    }
}
