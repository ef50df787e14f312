//! User data model and follow relationships.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier carried leading or trailing whitespace.
    InvalidId,
    /// The display name was empty or whitespace.
    EmptyDisplayName,
    /// The display name exceeded [`DISPLAY_NAME_MAX`] characters.
    DisplayNameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The display name contained characters outside the allowed set.
    DisplayNameInvalidCharacters,
    /// A user tried to follow themselves.
    SelfFollow,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must not have surrounding whitespace"),
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "display name must be at most {max} characters")
            }
            Self::DisplayNameInvalidCharacters => write!(
                f,
                "display name may only contain letters, numbers, spaces, dots, hyphens, or underscores",
            ),
            Self::SelfFollow => write!(f, "users cannot follow themselves"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable, opaque user identifier.
///
/// Imported users may carry arbitrary identifiers; ids minted by the service
/// are UUID v4 strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    ///
    /// # Examples
    /// ```
    /// use chirp::domain::UserId;
    ///
    /// assert!(UserId::new("alice").is_ok());
    /// assert!(UserId::new(" alice").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Human readable, unique display name used for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 32;

static DISPLAY_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn display_name_regex() -> &'static Regex {
    DISPLAY_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = r"^[A-Za-z0-9_.\- ]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("display name regex failed to compile: {error}"))
    })
}

impl DisplayName {
    /// Validate and construct a [`DisplayName`] from owned input.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(display_name.into())
    }

    fn from_owned(display_name: String) -> Result<Self, UserValidationError> {
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if display_name.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        if !display_name_regex().is_match(&display_name) {
            return Err(UserValidationError::DisplayNameInvalidCharacters);
        }
        Ok(Self(display_name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Result of adding a follow edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    /// The followee was not yet followed and has been added.
    Added,
    /// The followee was already in the follow-set; nothing changed.
    AlreadyFollowing,
}

/// Insertion-ordered set of followed users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowSet(Vec<UserId>);

impl FollowSet {
    /// Empty follow-set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Whether `user_id` is followed.
    #[must_use]
    pub fn contains(&self, user_id: &UserId) -> bool {
        self.0.contains(user_id)
    }

    /// Number of followed users.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nobody is followed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate followees in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }

    fn insert(&mut self, user_id: UserId) -> FollowOutcome {
        if self.contains(&user_id) {
            return FollowOutcome::AlreadyFollowing;
        }
        self.0.push(user_id);
        FollowOutcome::Added
    }
}

impl<'a> IntoIterator for &'a FollowSet {
    type Item = &'a UserId;
    type IntoIter = std::slice::Iter<'a, UserId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Application user with their follow-set.
///
/// ## Invariants
/// - the follow-set never contains the user's own id;
/// - the follow-set holds no duplicates.
///
/// # Examples
/// ```
/// use chirp::domain::{FollowOutcome, User, UserId};
///
/// let mut alice = User::from_strings("alice", "alice");
/// let bob = UserId::new("bob").expect("valid id");
/// assert_eq!(alice.follow(bob.clone()), Ok(FollowOutcome::Added));
/// assert_eq!(alice.follow(bob), Ok(FollowOutcome::AlreadyFollowing));
/// assert!(alice.follow(alice.id().clone()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    display_name: DisplayName,
    follows: FollowSet,
}

impl User {
    /// Build a user who follows nobody.
    #[must_use]
    pub const fn new(id: UserId, display_name: DisplayName) -> Self {
        Self {
            id,
            display_name,
            follows: FollowSet::new(),
        }
    }

    /// Rebuild a stored user, dropping duplicates and self-references.
    #[must_use]
    pub fn with_follows(
        id: UserId,
        display_name: DisplayName,
        follows: impl IntoIterator<Item = UserId>,
    ) -> Self {
        let mut user = Self::new(id, display_name);
        for followee in follows {
            if followee != user.id {
                user.follows.insert(followee);
            }
        }
        user
    }

    /// Build a user from string inputs, panicking if validation fails.
    ///
    /// Prefer [`User::new`] when components are already validated.
    ///
    /// # Panics
    ///
    /// Panics when either value fails validation.
    #[must_use]
    pub fn from_strings(id: impl AsRef<str>, display_name: impl Into<String>) -> Self {
        match Self::try_from_strings(id, display_name) {
            Ok(value) => value,
            Err(err) => panic!("user string values must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor enforcing identifier and display name invariants.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        display_name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let id = UserId::new(id)?;
        let display_name = DisplayName::new(display_name)?;
        Ok(Self::new(id, display_name))
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name shown to other users.
    #[must_use]
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Users this user follows.
    #[must_use]
    pub const fn follows(&self) -> &FollowSet {
        &self.follows
    }

    /// Whether this user follows `user_id`.
    #[must_use]
    pub fn is_following(&self, user_id: &UserId) -> bool {
        self.follows.contains(user_id)
    }

    /// Add `followee` to the follow-set.
    pub fn follow(&mut self, followee: UserId) -> Result<FollowOutcome, UserValidationError> {
        if followee == self.id {
            return Err(UserValidationError::SelfFollow);
        }
        Ok(self.follows.insert(followee))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct UserDto {
    id: String,
    display_name: String,
    #[serde(default)]
    follows: Vec<String>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            display_name,
            follows,
        } = value;
        Self {
            id: id.into(),
            display_name: display_name.into(),
            follows: follows.0.into_iter().map(String::from).collect(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let id = UserId::new(value.id)?;
        let display_name = DisplayName::new(value.display_name)?;
        let follows = value
            .follows
            .into_iter()
            .map(UserId::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        if follows.contains(&id) {
            return Err(UserValidationError::SelfFollow);
        }
        Ok(Self::with_follows(id, display_name, follows))
    }
}

#[cfg(test)]
mod tests;
