//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When the
//! migrations change, regenerate with `diesel print-schema` or edit by hand.

diesel::table! {
    /// User accounts keyed by opaque identifier.
    users (id) {
        /// Primary key: opaque user identifier.
        id -> Varchar,
        /// Unique display name used for lookups.
        display_name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Follow edges; `position` preserves insertion order per follower.
    user_follows (follower_id, followee_id) {
        /// User who follows.
        follower_id -> Varchar,
        /// User being followed.
        followee_id -> Varchar,
        /// Zero-based order within the follower's set.
        position -> Int4,
        /// Edge creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Immutable published posts.
    posts (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Author identifier.
        author_id -> Varchar,
        /// Post body.
        content -> Text,
        /// Creation timestamp supplied by the service clock.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Feed events awaiting relay to the notification channel.
    feed_event_outbox (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Event name taken from the payload `type` field.
        event_type -> Varchar,
        /// Event payload.
        payload -> Jsonb,
        /// Time the row was written.
        created_at -> Timestamptz,
        /// Time a relay published the row, if any.
        published_at -> Nullable<Timestamptz>,
        /// Relay attempts so far.
        retry_count -> Int4,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::joinable!(user_follows -> users (follower_id));

diesel::allow_tables_to_appear_in_same_query!(feed_event_outbox, posts, user_follows, users);
