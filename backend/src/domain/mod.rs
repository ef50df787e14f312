//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed entities (users, posts, feed events), the
//! ports the hexagon exposes, and the services that implement the driving
//! ports. Nothing here depends on Actix or Diesel.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - User, Post and their validated components.
//! - PostPublicationService, RelationshipService, FeedAssemblyService and
//!   UserDirectoryService: the workflows behind the driving ports.

pub mod error;
pub mod feed_assembly_service;
pub mod feed_event;
pub(crate) mod port_error_mapping;
pub mod ports;
pub mod post;
pub mod post_publication_service;
pub mod relationship_service;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;

#[cfg(test)]
pub(crate) mod service_test_support;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feed_assembly_service::{DEFAULT_FANOUT_LIMIT, FeedAssemblyService};
pub use self::feed_event::FeedEvent;
pub use self::post::{POST_CONTENT_MAX, Post, PostContent, PostId, PostValidationError};
pub use self::post_publication_service::PostPublicationService;
pub use self::relationship_service::RelationshipService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, FollowOutcome, FollowSet, User, UserId, UserValidationError,
};
pub use self::user_directory_service::UserDirectoryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use chirp::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
