//! Outbox table implementing [`EventAnnouncer`].
//!
//! Each announced payload becomes a `feed_event_outbox` row, written on its
//! own connection after the post or follow write has committed. A relay process
//! drains unpublished rows onto the notification channel and stamps
//! `published_at`; the relay is not part of this service.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::ports::{AnnounceError, EventAnnouncer};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewOutboxRow;
use super::pool::DbPool;
use super::schema::feed_event_outbox;

/// Outbox writer over the shared pool.
#[derive(Clone)]
pub struct DieselEventOutbox {
    pool: DbPool,
}

impl DieselEventOutbox {
    /// Create an outbox writer over `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Parse `payload` and pull out its `type` field.
fn decode_payload(payload: &[u8]) -> Result<(String, Value), AnnounceError> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|err| AnnounceError::rejected(format!("payload is not JSON: {err}")))?;
    let event_type = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| AnnounceError::rejected("payload has no `type` field"))?
        .to_owned();
    Ok((event_type, value))
}

#[async_trait]
impl EventAnnouncer for DieselEventOutbox {
    async fn publish(&self, payload: &[u8]) -> Result<(), AnnounceError> {
        let (event_type, value) = decode_payload(payload)?;
        let row = NewOutboxRow {
            id: Uuid::new_v4(),
            event_type: &event_type,
            payload: &value,
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AnnounceError::unavailable))?;

        diesel::insert_into(feed_event_outbox::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                map_diesel_error(err, AnnounceError::unavailable, AnnounceError::unavailable)
            })
    }
}
