//! Recording event announcer.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::FeedEvent;
use crate::domain::ports::{AnnounceError, EventAnnouncer};

/// [`EventAnnouncer`] that keeps every payload in memory.
///
/// It can be switched into a failing mode to exercise announcement errors.
#[derive(Debug, Default)]
pub struct InMemoryEventAnnouncer {
    published: Mutex<Vec<Vec<u8>>>,
    failing: AtomicBool,
}

impl InMemoryEventAnnouncer {
    /// Announcer that accepts payloads.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent publishes fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Raw payloads published so far.
    #[must_use]
    pub fn published(&self) -> Vec<Vec<u8>> {
        self.published
            .lock()
            .map(|payloads| payloads.clone())
            .unwrap_or_default()
    }

    /// Published payloads decoded as feed events; undecodable ones are skipped.
    #[must_use]
    pub fn events(&self) -> Vec<FeedEvent> {
        self.published()
            .iter()
            .filter_map(|payload| FeedEvent::from_bytes(payload).ok())
            .collect()
    }
}

#[async_trait]
impl EventAnnouncer for InMemoryEventAnnouncer {
    async fn publish(&self, payload: &[u8]) -> Result<(), AnnounceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AnnounceError::unavailable("announcer switched off"));
        }
        let mut published = self
            .published
            .lock()
            .map_err(|_| AnnounceError::unavailable("announcer lock poisoned"))?;
        published.push(payload.to_vec());
        debug!(bytes = payload.len(), "event recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    #[tokio::test]
    async fn records_payloads_and_decodes_events() {
        let announcer = InMemoryEventAnnouncer::new();
        let event = FeedEvent::FollowCreated {
            follower_id: UserId::new("a").expect("valid id"),
            followee_id: UserId::new("b").expect("valid id"),
        };
        announcer
            .publish(&event.to_bytes())
            .await
            .expect("publish succeeds");

        assert_eq!(announcer.events(), vec![event]);
    }

    #[tokio::test]
    async fn failing_mode_rejects_and_records_nothing() {
        let announcer = InMemoryEventAnnouncer::new();
        announcer.set_failing(true);

        let error = announcer.publish(b"{}").await.expect_err("switched off");
        assert!(matches!(error, AnnounceError::Unavailable { .. }));
        assert!(announcer.published().is_empty());

        announcer.set_failing(false);
        announcer.publish(b"{}").await.expect("switched back on");
        assert_eq!(announcer.published().len(), 1);
    }
}
