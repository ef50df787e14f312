//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`EventAnnouncer`], [`ImportSource`]) are
//! implemented by outbound adapters. Driving ports (`*Command`, `*Query`)
//! are implemented by the domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod event_announcer;
mod feed_query;
mod follow_command;
mod import_source;
mod post_command;
mod post_repository;
mod user_directory_command;
mod user_repository;

#[cfg(test)]
pub use event_announcer::MockEventAnnouncer;
pub use event_announcer::{AnnounceError, EventAnnouncer, FixtureEventAnnouncer};
#[cfg(test)]
pub use feed_query::MockFeedQuery;
pub use feed_query::{FeedQuery, FeedRequest, FixtureFeedQuery};
#[cfg(test)]
pub use follow_command::MockFollowCommand;
pub use follow_command::{FixtureFollowCommand, FollowCommand, FollowRequest};
#[cfg(test)]
pub use import_source::MockImportSource;
pub use import_source::{FixtureImportSource, ImportSource, ImportSourceError};
#[cfg(test)]
pub use post_command::MockPostCommand;
pub use post_command::{FixturePostCommand, PostCommand, PublishPostRequest};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{FixturePostRepository, PostPersistenceError, PostRepository};
#[cfg(test)]
pub use user_directory_command::MockUserDirectoryCommand;
pub use user_directory_command::{
    FixtureUserDirectoryCommand, ImportReport, ImportedUser, SkipReason, SkippedFollow,
    UserDirectoryCommand,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
