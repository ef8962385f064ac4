mod config;
mod message;
mod relay_service;
mod result;
mod traits;

pub use config::*;
pub use message::*;
pub use relay_service::*;
pub use result::*;
pub use traits::*;
