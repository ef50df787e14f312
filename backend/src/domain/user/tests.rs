//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn alice() -> User {
    User::from_strings("alice-id", "alice")
}

#[fixture]
fn bob_id() -> UserId {
    UserId::new("bob-id").expect("valid id")
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case(" alice", UserValidationError::InvalidId)]
#[case("alice\n", UserValidationError::InvalidId)]
fn user_id_rejects_malformed_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn random_user_ids_are_uuids() {
    let id = UserId::random();
    assert!(Uuid::parse_str(id.as_ref()).is_ok());
    assert_ne!(id, UserId::random());
}

#[rstest]
#[case("a")]
#[case("Ada Lovelace")]
#[case("alice_b.c-d 123")]
fn display_name_accepts_allowed_characters(#[case] raw: &str) {
    let name = DisplayName::new(raw).expect("valid name");
    assert_eq!(name.as_ref(), raw);
}

#[rstest]
fn display_name_accepts_maximum_length() {
    let raw = "a".repeat(DISPLAY_NAME_MAX);
    assert!(DisplayName::new(raw).is_ok());
}

#[rstest]
fn display_name_rejects_too_long_values() {
    let raw = "a".repeat(DISPLAY_NAME_MAX + 1);
    assert!(matches!(
        DisplayName::new(raw),
        Err(UserValidationError::DisplayNameTooLong { max }) if max == DISPLAY_NAME_MAX
    ));
}

#[rstest]
#[case("   ", UserValidationError::EmptyDisplayName)]
#[case("bad$char", UserValidationError::DisplayNameInvalidCharacters)]
#[case("comma,name", UserValidationError::DisplayNameInvalidCharacters)]
fn display_name_rejects_invalid_values(
    #[case] raw: &str,
    #[case] expected: UserValidationError,
) {
    assert_eq!(DisplayName::new(raw), Err(expected));
}

#[rstest]
fn from_strings_panics_when_invalid() {
    let result = std::panic::catch_unwind(|| User::from_strings("", "Ada"));
    assert!(result.is_err());
}

#[rstest]
fn new_users_follow_nobody(alice: User) {
    assert!(alice.follows().is_empty());
}

#[rstest]
fn follow_adds_then_reports_existing_edge(mut alice: User, bob_id: UserId) {
    assert_eq!(alice.follow(bob_id.clone()), Ok(FollowOutcome::Added));
    assert_eq!(alice.follow(bob_id.clone()), Ok(FollowOutcome::AlreadyFollowing));
    assert_eq!(alice.follows().len(), 1);
    assert!(alice.is_following(&bob_id));
}

#[rstest]
fn follow_rejects_self(mut alice: User) {
    let own = alice.id().clone();
    assert_eq!(alice.follow(own), Err(UserValidationError::SelfFollow));
    assert!(alice.follows().is_empty());
}

#[rstest]
fn follow_set_keeps_insertion_order(mut alice: User) {
    let ids = ["c", "a", "b"].map(|raw| UserId::new(raw).expect("valid id"));
    for id in ids.clone() {
        alice.follow(id).expect("not a self follow");
    }
    let seen: Vec<_> = alice.follows().iter().cloned().collect();
    assert_eq!(seen, ids.to_vec());
}

#[rstest]
fn with_follows_drops_duplicates_and_self(bob_id: UserId) {
    let id = UserId::new("alice-id").expect("valid id");
    let name = DisplayName::new("alice").expect("valid name");
    let user = User::with_follows(
        id.clone(),
        name,
        [bob_id.clone(), id, bob_id.clone()],
    );
    let seen: Vec<_> = user.follows().into_iter().cloned().collect();
    assert_eq!(seen, vec![bob_id]);
}

#[rstest]
fn serde_uses_camel_case(mut alice: User, bob_id: UserId) {
    alice.follow(bob_id).expect("not a self follow");
    let value = serde_json::to_value(&alice).expect("serialise to JSON");
    assert_eq!(
        value,
        json!({"id": "alice-id", "displayName": "alice", "follows": ["bob-id"]})
    );
    let back: User = serde_json::from_value(value).expect("deserialise");
    assert_eq!(back, alice);
}

#[rstest]
fn deserialisation_rejects_self_follow() {
    let result = serde_json::from_value::<User>(json!({
        "id": "alice-id",
        "displayName": "alice",
        "follows": ["alice-id"],
    }));
    assert!(result.is_err());
}

#[rstest]
fn deserialisation_defaults_follows() {
    let user: User = serde_json::from_value(json!({"id": "x", "displayName": "x"}))
        .expect("follows are optional");
    assert!(user.follows().is_empty());
}
