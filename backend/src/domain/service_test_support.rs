//! Shared fixtures for the domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Post, PostContent, PostId, User, UserId};

pub(crate) struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
        .single()
        .expect("fixture timestamp is unambiguous")
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn user(name: &str) -> User {
    User::from_strings(format!("{name}-id"), name)
}

pub(crate) fn user_following(name: &str, followees: &[&User]) -> User {
    let mut follower = user(name);
    for followee in followees {
        follower
            .follow(followee.id().clone())
            .expect("fixtures never follow themselves");
    }
    follower
}

/// Post by `author` created `hours_ago` before the fixture timestamp.
pub(crate) fn post_by(author: &UserId, content: &str, hours_ago: i64) -> Post {
    Post::new(
        PostId::random(),
        author.clone(),
        PostContent::new(content).expect("fixture content is valid"),
        fixture_timestamp() - Duration::hours(hours_ago),
    )
}
