//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects the handler paths from the inbound layer and the
//! schema wrappers in [`crate::inbound::http::schemas`], which describe the
//! domain types without coupling them to utoipa. The document is served by
//! Swagger UI in debug builds.

use crate::inbound::http::follows::FollowBody;
use crate::inbound::http::posts::PublishPostBody;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, FeedPageSchema, ImportReportSchema, ImportedUserSchema,
    PostSchema, SkipReasonSchema, SkippedFollowSchema,
};
use crate::inbound::http::users::ImportUsersBody;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chirp feed API",
        description = "Publish posts, follow users, read assembled feeds and import user directories.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::posts::publish_post,
        crate::inbound::http::follows::follow_user,
        crate::inbound::http::feed::get_feed,
        crate::inbound::http::users::import_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PostSchema,
        FeedPageSchema,
        SkipReasonSchema,
        ImportedUserSchema,
        SkippedFollowSchema,
        ImportReportSchema,
        PublishPostBody,
        FollowBody,
        ImportUsersBody,
    )),
    tags(
        (name = "posts", description = "Post publication"),
        (name = "follows", description = "Follow relationships"),
        (name = "feed", description = "Feed assembly"),
        (name = "users", description = "User directory import"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
