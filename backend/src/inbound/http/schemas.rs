//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these wrappers describe their wire
//! shape from the adapter layer instead.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// A referenced resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with current state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A store or the event channel is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "post content must not be empty")]
    message: String,
    /// Correlation identifier echoed in the `Trace-Id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details; `details.code` narrows the failure.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Post`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Post)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PostSchema {
    /// Post identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Author identifier.
    #[schema(example = "alice-id")]
    author_id: String,
    /// Post body, at most 280 characters.
    #[schema(example = "Hello, world")]
    content: String,
    /// Creation timestamp (RFC 3339).
    #[schema(example = "2026-03-14T12:00:00Z")]
    created_at: String,
}

/// OpenAPI schema for a feed page.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct FeedPageSchema {
    /// Posts, newest first.
    items: Vec<PostSchema>,
    /// Token for the next page when this one came back full.
    next_cursor: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ports::SkipReason`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::SkipReason)]
pub enum SkipReasonSchema {
    /// No user with that name exists.
    #[schema(rename = "unknown_user")]
    UnknownUser,
    /// The line names its own user.
    #[schema(rename = "self_follow")]
    SelfFollow,
    /// The follow name is not a valid display name.
    #[schema(rename = "invalid_name")]
    InvalidName,
}

/// OpenAPI schema for [`crate::domain::ports::ImportedUser`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::ImportedUser)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ImportedUserSchema {
    /// Stored user identifier.
    id: String,
    /// Display name from the file.
    display_name: String,
    /// Follow-set size after the import.
    follow_count: u32,
}

/// OpenAPI schema for [`crate::domain::ports::SkippedFollow`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::SkippedFollow)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct SkippedFollowSchema {
    /// 1-based line number.
    line: u32,
    /// Importing user's name.
    follower: String,
    /// Follow name as written.
    followee: String,
    /// Why no edge was created.
    reason: SkipReasonSchema,
}

/// OpenAPI schema for [`crate::domain::ports::ImportReport`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::ImportReport)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ImportReportSchema {
    /// Users written, in file order.
    users: Vec<ImportedUserSchema>,
    /// Users that did not exist before.
    created: u32,
    /// Existing users that were updated.
    updated: u32,
    /// Blank or follow-less lines.
    skipped_lines: u32,
    /// Follow names that produced no edge.
    skipped_follows: Vec<SkippedFollowSchema>,
}
