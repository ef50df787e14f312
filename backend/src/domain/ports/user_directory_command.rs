//! Driving port for bulk user directory imports.
//!
//! The directory format is line oriented: `name,follow1,follow2,...`. Each
//! name becomes a user; each follow name becomes an edge once every user in
//! the file exists.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, UserId};

/// One user touched by an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedUser {
    /// Identifier of the stored user.
    pub id: UserId,
    /// Display name taken from the file.
    pub display_name: String,
    /// Follow-set size after the import.
    pub follow_count: usize,
}

/// Follow name that could not be turned into an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedFollow {
    /// 1-based line number in the source.
    pub line: usize,
    /// Name of the importing user.
    pub follower: String,
    /// Follow name as written.
    pub followee: String,
    /// Why the edge was skipped.
    pub reason: SkipReason,
}

/// Reason a follow name was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No user with that name exists.
    UnknownUser,
    /// The line names its own user.
    SelfFollow,
    /// The follow name is not a valid display name.
    InvalidName,
}

/// Summary of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Users written by the import, in file order.
    pub users: Vec<ImportedUser>,
    /// Number of users that did not exist before.
    pub created: usize,
    /// Number of existing users that were updated.
    pub updated: usize,
    /// Lines ignored because they were blank or had no follow field.
    pub skipped_lines: usize,
    /// Follow names that produced no edge.
    pub skipped_follows: Vec<SkippedFollow>,
}

/// Driving port for user directory imports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryCommand: Send + Sync {
    /// Import the file at `path`.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the file does not exist.
    /// - `InvalidRequest` when a line carries an invalid display name.
    /// - `ServiceUnavailable` or `InternalError` on read or store failures.
    async fn import_file(&self, path: &Path) -> Result<ImportReport, Error>;

    /// Import directory text that is already in memory.
    ///
    /// # Errors
    ///
    /// As [`UserDirectoryCommand::import_file`], minus file errors.
    async fn import_lines(&self, contents: &str) -> Result<ImportReport, Error>;
}

/// Fixture command that reports an empty import.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectoryCommand;

#[async_trait]
impl UserDirectoryCommand for FixtureUserDirectoryCommand {
    async fn import_file(&self, _path: &Path) -> Result<ImportReport, Error> {
        Ok(ImportReport::default())
    }

    async fn import_lines(&self, _contents: &str) -> Result<ImportReport, Error> {
        Ok(ImportReport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn fixture_reports_nothing() {
        let report = FixtureUserDirectoryCommand
            .import_lines("alice,bob")
            .await
            .expect("fixture succeeds");
        assert_eq!(report, ImportReport::default());
    }

    #[test]
    fn report_serialises_camel_case() {
        let report = ImportReport {
            users: Vec::new(),
            created: 1,
            updated: 0,
            skipped_lines: 2,
            skipped_follows: vec![SkippedFollow {
                line: 3,
                follower: "alice".to_owned(),
                followee: "ghost".to_owned(),
                reason: SkipReason::UnknownUser,
            }],
        };
        let value = serde_json::to_value(&report).expect("report serialises");
        assert_eq!(value.get("skippedLines"), Some(&json!(2)));
        assert_eq!(
            value.pointer("/skippedFollows/0/reason"),
            Some(&json!("unknown_user"))
        );
    }
}
