//! Follow endpoint.
//!
//! ```text
//! POST /api/v1/follows {"followerId":"alice-id","followeeId":"bob-id"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::FollowRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id, require};

const FOLLOWER_ID: FieldName = FieldName::new("followerId");
const FOLLOWEE_ID: FieldName = FieldName::new("followeeId");

/// Request body for creating a follow relationship.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowBody {
    /// User who follows.
    #[schema(example = "alice-id")]
    pub follower_id: Option<String>,
    /// User to follow.
    #[schema(example = "bob-id")]
    pub followee_id: Option<String>,
}

fn parse_body(body: FollowBody) -> ApiResult<FollowRequest> {
    let follower_id = require(body.follower_id, FOLLOWER_ID)?;
    let followee_id = require(body.followee_id, FOLLOWEE_ID)?;
    Ok(FollowRequest {
        follower_id: parse_user_id(&follower_id, FOLLOWER_ID)?,
        followee_id: parse_user_id(&followee_id, FOLLOWEE_ID)?,
    })
}

/// Make one user follow another. Following twice is not an error.
#[utoipa::path(
    post,
    path = "/api/v1/follows",
    request_body = FollowBody,
    responses(
        (status = 204, description = "Relationship exists"),
        (status = 400, description = "Self-follow or invalid request", body = ErrorSchema),
        (status = 404, description = "Either user does not exist", body = ErrorSchema),
        (status = 503, description = "Store or event channel unavailable", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "followUser"
)]
#[post("/follows")]
pub async fn follow_user(
    state: web::Data<HttpState>,
    payload: web::Json<FollowBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_body(payload.into_inner())?;
    state.follows.follow(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test::{self};
    use rstest::rstest;
    use serde_json::json;

    use crate::domain::ports::MockFollowCommand;
    use crate::domain::{ErrorCode, UserId};
    use crate::inbound::http::test_utils::{call_json, test_app};

    #[rstest]
    fn both_ids_are_required() {
        let err = parse_body(FollowBody {
            follower_id: Some("alice-id".to_owned()),
            followee_id: None,
        })
        .expect_err("followee missing");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.reason(), Some("missing_field"));
    }

    #[rstest]
    #[actix_web::test]
    async fn successful_follow_returns_no_content() {
        let mut command = MockFollowCommand::new();
        command
            .expect_follow()
            .withf(|request| {
                request.follower_id == UserId::new("alice-id").expect("valid id")
                    && request.followee_id == UserId::new("bob-id").expect("valid id")
            })
            .times(1)
            .returning(|_| Ok(()));
        let state = HttpState::default().with_follows(Arc::new(command));
        let app = test::init_service(test_app(state)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/follows")
                .set_json(json!({"followerId": "alice-id", "followeeId": "bob-id"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[actix_web::test]
    async fn self_follow_is_a_bad_request() {
        let app = test::init_service(test_app(HttpState::default())).await;

        let (status, body) = call_json(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/follows")
                .set_json(json!({"followerId": "alice-id", "followeeId": "alice-id"}))
                .to_request(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.pointer("/details/code"),
            Some(&json!("invalid_follow_action"))
        );
    }
}
