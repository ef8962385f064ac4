use crate::domain::DomainResult;
use async_trait::async_trait;
use bytes::Bytes;

/// Trait for publishing messages to the cloud broker
///
/// Abstracts the outbound transport so the relay pipeline can be exercised
/// against a mock without a live connection. Success means the message was
/// handed to the transport, not that it was delivered; delivery outcomes
/// surface only through the connection lifecycle events.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Publish a serialized message body to a topic
    async fn publish(&self, topic: &str, payload: Bytes) -> DomainResult<()>;
}

/// Trait for observing connection lifecycle events
///
/// The bridge observes the transport's connect/error cycle but never
/// controls it; reconnection is entirely the transport's responsibility.
/// Injected so tests can assert on emitted events instead of captured
/// log output.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ConnectionObserver: Send + Sync {
    /// Called when the broker acknowledges a connection
    fn on_connect(&self);

    /// Called on a transport error, only when error printing is enabled
    fn on_error(&self, error: &str);
}
