//! Feed endpoint.
//!
//! ```text
//! GET /api/v1/users/{userId}/feed?limit=20&offset=0
//! GET /api/v1/users/{userId}/feed?cursor=eyJvIjoyMH0
//! ```

use actix_web::{get, web};
use pagination::{OffsetCursor, Page, PageRequest};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::Post;
use crate::domain::ports::FeedRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, FeedPageSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_cursor_error, parse_user_id};

const USER_ID: FieldName = FieldName::new("userId");

/// Paging parameters. `cursor` wins over `offset` when both are present.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FeedParams {
    /// Page size, capped at 100; defaults to 20. Zero yields an empty page.
    pub limit: Option<usize>,
    /// Items to skip; defaults to 0.
    pub offset: Option<usize>,
    /// Opaque token from a previous page's `nextCursor`.
    pub cursor: Option<String>,
}

fn page_request(params: FeedParams) -> ApiResult<PageRequest> {
    let offset = match params.cursor {
        Some(token) => OffsetCursor::decode(&token)
            .map_err(|_| invalid_cursor_error(&token))?
            .offset(),
        None => params.offset.unwrap_or(0),
    };
    Ok(PageRequest::bounded(params.limit, offset))
}

/// Posts by the users `userId` follows, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/feed",
    params(
        ("userId" = String, Path, description = "User whose feed to assemble"),
        FeedParams
    ),
    responses(
        (status = 200, description = "A page of the feed", body = FeedPageSchema),
        (status = 400, description = "Invalid identifier or paging parameters", body = ErrorSchema),
        (status = 404, description = "User does not exist", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["feed"],
    operation_id = "getFeed"
)]
#[get("/users/{user_id}/feed")]
pub async fn get_feed(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: web::Query<FeedParams>,
) -> ApiResult<web::Json<Page<Post>>> {
    let user_id = parse_user_id(&path.into_inner(), USER_ID)?;
    let page = page_request(params.into_inner())?;
    let posts = state.feed.assemble(FeedRequest { user_id, page }).await?;
    Ok(web::Json(Page::from_window(posts, page)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test::{self};
    use chrono::{DateTime, Utc};
    use pagination::{DEFAULT_LIMIT, MAX_LIMIT};
    use rstest::rstest;
    use serde_json::json;

    use crate::domain::ports::MockFeedQuery;
    use crate::domain::{Error, PostContent, PostId, UserId};
    use crate::inbound::http::test_utils::{call_json, test_app};

    fn feed_request(uri: &str) -> actix_http::Request {
        test::TestRequest::get().uri(uri).to_request()
    }

    fn params(limit: Option<usize>, offset: Option<usize>, cursor: Option<String>) -> FeedParams {
        FeedParams {
            limit,
            offset,
            cursor,
        }
    }

    #[rstest]
    #[case(params(None, None, None), PageRequest::new(DEFAULT_LIMIT, 0))]
    #[case(params(Some(0), Some(3), None), PageRequest::new(0, 3))]
    #[case(params(Some(1_000), None, None), PageRequest::new(MAX_LIMIT, 0))]
    #[case(
        params(Some(5), Some(3), Some(OffsetCursor::new(40).encode())),
        PageRequest::new(5, 40)
    )]
    fn paging_parameters_resolve(#[case] raw: FeedParams, #[case] expected: PageRequest) {
        assert_eq!(page_request(raw).expect("valid params"), expected);
    }

    #[rstest]
    fn garbage_cursor_is_rejected() {
        let err = page_request(params(None, None, Some("%%%".to_owned()))).expect_err("bad cursor");
        assert_eq!(err.reason(), Some("invalid_cursor"));
    }

    fn post(author: &str, content: &str) -> Post {
        Post::new(
            PostId::random(),
            UserId::new(author).expect("valid id"),
            PostContent::new(content).expect("valid content"),
            DateTime::<Utc>::UNIX_EPOCH,
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn full_page_carries_next_cursor() {
        let mut query = MockFeedQuery::new();
        query
            .expect_assemble()
            .withf(|request| {
                request.user_id.as_ref() == "alice-id" && request.page == PageRequest::new(2, 0)
            })
            .times(1)
            .returning(|_| Ok(vec![post("bob-id", "second"), post("bob-id", "first")]));
        let state = HttpState::default().with_feed(Arc::new(query));
        let app = test::init_service(test_app(state)).await;

        let request = feed_request("/api/v1/users/alice-id/feed?limit=2");
        let (status, body) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.pointer("/items/0/content"), Some(&json!("second")));
        let cursor = body
            .get("nextCursor")
            .and_then(serde_json::Value::as_str)
            .expect("cursor present");
        assert_eq!(OffsetCursor::decode(cursor).map(|c| c.offset()), Ok(2));
    }

    #[rstest]
    #[actix_web::test]
    async fn short_page_has_no_cursor() {
        let app = test::init_service(test_app(HttpState::default())).await;

        let request = feed_request("/api/v1/users/alice-id/feed?offset=10");
        let (status, body) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"items": [], "nextCursor": null}));
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_user_is_not_found() {
        let mut query = MockFeedQuery::new();
        query
            .expect_assemble()
            .returning(|request| Err(Error::user_not_found(request.user_id)));
        let state = HttpState::default().with_feed(Arc::new(query));
        let app = test::init_service(test_app(state)).await;

        let request = feed_request("/api/v1/users/ghost/feed");
        let (status, _) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn negative_limit_is_a_domain_error() {
        let app = test::init_service(test_app(HttpState::default())).await;

        let request = feed_request("/api/v1/users/alice-id/feed?limit=-1");
        let (status, body) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.pointer("/details/code"), Some(&json!("invalid_query")));
    }
}
