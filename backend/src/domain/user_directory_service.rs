//! Bulk user directory import.
//!
//! Each non-blank line reads `name,follow1,follow2,...`. Lines with fewer
//! than two fields are skipped. The import runs in two phases: every named
//! user is upserted first, then follow names are resolved by display name so
//! a line may refer to users defined further down the file. Users that
//! already exist keep their id and existing follow-set.
//!
//! Imports never announce events.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::port_error_mapping::{map_import_source_error, map_user_store_error};
use crate::domain::ports::{
    ImportReport, ImportSource, ImportedUser, SkipReason, SkippedFollow, UserDirectoryCommand,
    UserRepository,
};
use crate::domain::{DisplayName, Error, FollowOutcome, User, UserId};

/// One parsed directory line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DirectoryLine {
    number: usize,
    name: DisplayName,
    follows: Vec<String>,
}

/// Result of parsing a whole directory file.
#[derive(Debug, Default)]
struct ParsedDirectory {
    lines: Vec<DirectoryLine>,
    skipped_lines: usize,
}

fn parse_directory(contents: &str) -> Result<ParsedDirectory, Error> {
    let mut parsed = ParsedDirectory::default();
    for (index, raw) in contents.lines().enumerate() {
        let number = index + 1;
        let mut fields = raw.trim().split(',').map(str::trim);
        let name = fields.next().unwrap_or_default();
        let follows: Vec<String> = fields.map(str::to_owned).collect();
        if name.is_empty() || follows.is_empty() {
            parsed.skipped_lines += 1;
            continue;
        }
        let name = DisplayName::new(name).map_err(|err| {
            Error::invalid_request(format!("line {number}: {err}")).with_details(json!({
                "line": number,
                "code": "invalid_display_name",
            }))
        })?;
        parsed.lines.push(DirectoryLine {
            number,
            name,
            follows: follows.into_iter().filter(|f| !f.is_empty()).collect(),
        });
    }
    Ok(parsed)
}

/// User staged by phase one.
struct StagedUser {
    user: User,
    created: bool,
    changed: bool,
}

/// Service implementing [`UserDirectoryCommand`].
#[derive(Clone)]
pub struct UserDirectoryService<U, S> {
    users: Arc<U>,
    source: Arc<S>,
}

impl<U, S> UserDirectoryService<U, S> {
    /// Create the service.
    pub const fn new(users: Arc<U>, source: Arc<S>) -> Self {
        Self { users, source }
    }
}

impl<U, S> UserDirectoryService<U, S>
where
    U: UserRepository,
    S: ImportSource,
{
    /// Phase one: upsert every named user, keeping file order.
    async fn stage_users(
        &self,
        lines: &[DirectoryLine],
    ) -> Result<(Vec<StagedUser>, HashMap<DisplayName, usize>), Error> {
        let mut staged: Vec<StagedUser> = Vec::new();
        let mut by_name: HashMap<DisplayName, usize> = HashMap::new();

        for line in lines {
            if by_name.contains_key(&line.name) {
                continue;
            }
            let existing = self
                .users
                .find_by_name(&line.name)
                .await
                .map_err(map_user_store_error)?;
            let created = existing.is_none();
            let user =
                existing.unwrap_or_else(|| User::new(UserId::random(), line.name.clone()));
            if created {
                self.users.save(&user).await.map_err(map_user_store_error)?;
            }
            by_name.insert(line.name.clone(), staged.len());
            staged.push(StagedUser {
                user,
                created,
                changed: false,
            });
        }
        Ok((staged, by_name))
    }

    async fn resolve_follow(
        &self,
        name: &DisplayName,
        staged: &[StagedUser],
        by_name: &HashMap<DisplayName, usize>,
    ) -> Result<Option<UserId>, Error> {
        if let Some(entry) = by_name.get(name).and_then(|index| staged.get(*index)) {
            return Ok(Some(entry.user.id().clone()));
        }
        Ok(self
            .users
            .find_by_name(name)
            .await
            .map_err(map_user_store_error)?
            .map(|user| user.id().clone()))
    }

    /// Phase two: add edges, recording names that produce none.
    async fn link_follows(
        &self,
        lines: &[DirectoryLine],
        staged: &mut [StagedUser],
        by_name: &HashMap<DisplayName, usize>,
    ) -> Result<Vec<SkippedFollow>, Error> {
        let mut skipped = Vec::new();
        for line in lines {
            let Some(&index) = by_name.get(&line.name) else {
                continue;
            };
            for follow in &line.follows {
                let skip = |reason| SkippedFollow {
                    line: line.number,
                    follower: line.name.to_string(),
                    followee: follow.clone(),
                    reason,
                };
                let Ok(followee_name) = DisplayName::new(follow.as_str()) else {
                    skipped.push(skip(SkipReason::InvalidName));
                    continue;
                };
                if followee_name == line.name {
                    skipped.push(skip(SkipReason::SelfFollow));
                    continue;
                }
                let Some(followee_id) = self.resolve_follow(&followee_name, staged, by_name).await?
                else {
                    warn!(line = line.number, follower = %line.name, followee = %follow, "follow name matches no user");
                    skipped.push(skip(SkipReason::UnknownUser));
                    continue;
                };
                let Some(entry) = staged.get_mut(index) else {
                    continue;
                };
                match entry.user.follow(followee_id) {
                    Ok(FollowOutcome::Added) => entry.changed = true,
                    Ok(FollowOutcome::AlreadyFollowing) => {}
                    // Two names can map to the same stored user id.
                    Err(_) => skipped.push(skip(SkipReason::SelfFollow)),
                }
            }
        }
        Ok(skipped)
    }
}

#[async_trait]
impl<U, S> UserDirectoryCommand for UserDirectoryService<U, S>
where
    U: UserRepository,
    S: ImportSource,
{
    async fn import_file(&self, path: &Path) -> Result<ImportReport, Error> {
        let contents = self
            .source
            .read_to_string(path)
            .await
            .map_err(map_import_source_error)?;
        self.import_lines(&contents).await
    }

    async fn import_lines(&self, contents: &str) -> Result<ImportReport, Error> {
        let parsed = parse_directory(contents)?;
        let (mut staged, by_name) = self.stage_users(&parsed.lines).await?;
        let skipped_follows = self
            .link_follows(&parsed.lines, &mut staged, &by_name)
            .await?;

        for entry in staged.iter().filter(|entry| entry.changed) {
            self.users
                .save(&entry.user)
                .await
                .map_err(map_user_store_error)?;
        }

        let created = staged.iter().filter(|entry| entry.created).count();
        let report = ImportReport {
            users: staged
                .iter()
                .map(|entry| ImportedUser {
                    id: entry.user.id().clone(),
                    display_name: entry.user.display_name().to_string(),
                    follow_count: entry.user.follows().len(),
                })
                .collect(),
            created,
            updated: staged.len() - created,
            skipped_lines: parsed.skipped_lines,
            skipped_follows,
        };
        info!(
            created = report.created,
            updated = report.updated,
            skipped_lines = report.skipped_lines,
            skipped_follows = report.skipped_follows.len(),
            "user directory imported"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "user_directory_service_tests.rs"]
mod tests;
