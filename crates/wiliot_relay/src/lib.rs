mod domain;
mod mqtt;
mod wiliot_relay;

pub use domain::*;
pub use mqtt::*;
pub use wiliot_relay::*;
