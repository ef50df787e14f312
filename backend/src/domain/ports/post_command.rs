//! Driving port for publishing posts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Post, PostContent, PostId, UserId};

/// Request to publish a post.
///
/// `content` is raw input; it is validated only after the author is known to
/// exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPostRequest {
    /// Author of the post.
    pub author_id: UserId,
    /// Unvalidated post body.
    pub content: String,
}

/// Driving port for post publication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Validate, store and announce a post.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the author does not exist.
    /// - `InvalidRequest` when the content is blank or too long.
    /// - `ServiceUnavailable` or `InternalError` when the store or the
    ///   announcer fails. An announcer failure leaves the post stored.
    async fn publish(&self, request: PublishPostRequest) -> Result<Post, Error>;
}

/// Fixture command that validates content and stamps the Unix epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostCommand;

#[async_trait]
impl PostCommand for FixturePostCommand {
    async fn publish(&self, request: PublishPostRequest) -> Result<Post, Error> {
        let content = PostContent::new(request.content)
            .map_err(|err| Error::invalid_content(err.to_string()))?;
        Ok(Post::new(
            PostId::random(),
            request.author_id,
            content,
            chrono::DateTime::UNIX_EPOCH,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_command_echoes_request() {
        let author_id = UserId::new("alice").expect("valid id");
        let post = FixturePostCommand
            .publish(PublishPostRequest {
                author_id: author_id.clone(),
                content: "hello".to_owned(),
            })
            .await
            .expect("fixture publish succeeds");
        assert_eq!(post.author_id(), &author_id);
        assert_eq!(post.content().as_ref(), "hello");
    }
}
