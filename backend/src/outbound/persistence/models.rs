//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{feed_event_outbox, posts, user_follows, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub display_name: String,
}

/// Insertable struct for creating or upserting user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub display_name: &'a str,
}

/// Insertable follow edge.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_follows)]
pub(crate) struct NewFollowRow<'a> {
    pub follower_id: &'a str,
    pub followee_id: &'a str,
    pub position: i32,
}

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: Uuid,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable post.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub id: Uuid,
    pub author_id: &'a str,
    pub content: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Insertable outbox entry.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = feed_event_outbox)]
pub(crate) struct NewOutboxRow<'a> {
    pub id: Uuid,
    pub event_type: &'a str,
    pub payload: &'a serde_json::Value,
}
