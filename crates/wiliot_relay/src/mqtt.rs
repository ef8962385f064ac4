mod connection;
mod publisher;

pub use connection::*;
pub use publisher::*;
