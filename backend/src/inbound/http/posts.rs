//! Post publication endpoint.
//!
//! ```text
//! POST /api/v1/posts {"authorId":"alice-id","content":"hello"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::PublishPostRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PostSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id, require};

const AUTHOR_ID: FieldName = FieldName::new("authorId");
const CONTENT: FieldName = FieldName::new("content");

/// Request body for publishing a post.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishPostBody {
    /// Author identifier.
    #[schema(example = "alice-id")]
    pub author_id: Option<String>,
    /// Post body, at most 280 characters.
    #[schema(example = "Hello, world")]
    pub content: Option<String>,
}

fn parse_body(body: PublishPostBody) -> ApiResult<PublishPostRequest> {
    let author_id = require(body.author_id, AUTHOR_ID)?;
    Ok(PublishPostRequest {
        author_id: parse_user_id(&author_id, AUTHOR_ID)?,
        content: require(body.content, CONTENT)?,
    })
}

/// Publish a post on behalf of an existing user.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = PublishPostBody,
    responses(
        (status = 201, description = "Post stored and announced", body = PostSchema),
        (status = 400, description = "Invalid content or request", body = ErrorSchema),
        (status = 404, description = "Author does not exist", body = ErrorSchema),
        (status = 503, description = "Store or event channel unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "publishPost"
)]
#[post("/posts")]
pub async fn publish_post(
    state: web::Data<HttpState>,
    payload: web::Json<PublishPostBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_body(payload.into_inner())?;
    let post = state.posts.publish(request).await?;
    Ok(HttpResponse::Created().json(post))
}
