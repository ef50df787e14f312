//! Tests for the relationship service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    AnnounceError, MockEventAnnouncer, MockUserRepository, UserPersistenceError,
};
use crate::domain::service_test_support::{user, user_following};
use crate::domain::{ErrorCode, User, UserId};
use rstest::rstest;

fn make_service(
    users: MockUserRepository,
    announcer: MockEventAnnouncer,
) -> RelationshipService<MockUserRepository, MockEventAnnouncer> {
    RelationshipService::new(Arc::new(users), Arc::new(announcer))
}

fn request(follower: &User, followee: &User) -> FollowRequest {
    FollowRequest {
        follower_id: follower.id().clone(),
        followee_id: followee.id().clone(),
    }
}

fn users_with(known: Vec<User>) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |id| Ok(known.iter().find(|u| u.id() == id).cloned()));
    users
}

#[tokio::test]
async fn follow_saves_edge_and_announces() {
    let alice = user("alice");
    let bob = user("bob");
    let mut users = users_with(vec![alice.clone(), bob.clone()]);
    let bob_id = bob.id().clone();
    users
        .expect_save()
        .withf(move |saved| saved.is_following(&bob_id))
        .times(1)
        .return_once(|_| Ok(()));
    let mut announcer = MockEventAnnouncer::new();
    announcer
        .expect_publish()
        .withf(|payload| {
            FeedEvent::from_bytes(payload)
                .is_ok_and(|event| matches!(event, FeedEvent::FollowCreated { .. }))
        })
        .times(1)
        .return_once(|_| Ok(()));

    make_service(users, announcer)
        .follow(request(&alice, &bob))
        .await
        .expect("follow succeeds");
}

#[rstest]
#[case("alice")]
#[case("bob")]
#[case("never-stored")]
#[tokio::test]
async fn self_follow_is_rejected_without_store_access(#[case] name: &str) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().never();
    users.expect_save().never();
    let someone = user(name);

    let error = make_service(users, MockEventAnnouncer::new())
        .follow(request(&someone, &someone))
        .await
        .expect_err("self follow");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.reason(), Some("invalid_follow_action"));
}

#[tokio::test]
async fn unknown_follower_is_not_found() {
    let bob = user("bob");
    let ghost = user("ghost");
    let error = make_service(users_with(vec![bob.clone()]), MockEventAnnouncer::new())
        .follow(request(&ghost, &bob))
        .await
        .expect_err("unknown follower");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(
        error.details().and_then(|d| d.get("userId")),
        Some(&serde_json::json!("ghost-id"))
    );
}

#[tokio::test]
async fn unknown_followee_is_not_found() {
    let alice = user("alice");
    let ghost = user("ghost");
    let mut users = users_with(vec![alice.clone()]);
    users.expect_save().never();

    let error = make_service(users, MockEventAnnouncer::new())
        .follow(request(&alice, &ghost))
        .await
        .expect_err("unknown followee");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn refollow_is_a_silent_success() {
    let bob = user("bob");
    let alice = user_following("alice", &[&bob]);
    let mut users = users_with(vec![alice.clone(), bob.clone()]);
    users.expect_save().never();
    let mut announcer = MockEventAnnouncer::new();
    announcer.expect_publish().never();

    make_service(users, announcer)
        .follow(request(&alice, &bob))
        .await
        .expect("re-follow succeeds");
}

#[tokio::test]
async fn store_failure_on_save_propagates() {
    let alice = user("alice");
    let bob = user("bob");
    let mut users = users_with(vec![alice.clone(), bob.clone()]);
    users
        .expect_save()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::query("deadlock")));
    let mut announcer = MockEventAnnouncer::new();
    announcer.expect_publish().never();

    let error = make_service(users, announcer)
        .follow(request(&alice, &bob))
        .await
        .expect_err("save fails");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn announce_failure_fails_the_call() {
    let alice = user("alice");
    let bob = user("bob");
    let mut users = users_with(vec![alice.clone(), bob.clone()]);
    users.expect_save().times(1).return_once(|_| Ok(()));
    let mut announcer = MockEventAnnouncer::new();
    announcer
        .expect_publish()
        .times(1)
        .return_once(|_| Err(AnnounceError::unavailable("down")));

    let error = make_service(users, announcer)
        .follow(request(&alice, &bob))
        .await
        .expect_err("announce fails");

    assert_eq!(error.reason(), Some("announce_failed"));
}

#[tokio::test]
async fn lookup_outage_is_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Err(UserPersistenceError::connection("refused")));

    let error = make_service(users, MockEventAnnouncer::new())
        .follow(FollowRequest {
            follower_id: UserId::new("a").expect("valid id"),
            followee_id: UserId::new("b").expect("valid id"),
        })
        .await
        .expect_err("store down");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
