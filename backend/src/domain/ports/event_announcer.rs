//! Port for announcing completed writes on a notification channel.
//!
//! Delivery is best effort from the service's point of view: a failed
//! announcement is reported to the caller but never rolls back the write
//! that preceded it.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by event announcer adapters.
    pub enum AnnounceError {
        /// The channel could not be reached.
        Unavailable { message: String } => "event channel unavailable: {message}",
        /// The channel rejected the payload.
        Rejected { message: String } => "event rejected: {message}",
    }
}

/// Publish opaque event payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventAnnouncer: Send + Sync {
    /// Publish one encoded event.
    async fn publish(&self, payload: &[u8]) -> Result<(), AnnounceError>;
}

/// Fixture announcer that accepts and drops every payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEventAnnouncer;

#[async_trait]
impl EventAnnouncer for FixtureEventAnnouncer {
    async fn publish(&self, _payload: &[u8]) -> Result<(), AnnounceError> {
        Ok(())
    }
}
