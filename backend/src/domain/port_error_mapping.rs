//! Translation of driven-port failures into domain errors.
//!
//! Connection problems become `ServiceUnavailable`; query problems become
//! `InternalError`. Both carry `details.code` so clients can tell a store
//! outage from an announcer outage.

use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{
    AnnounceError, ImportSourceError, PostPersistenceError, UserPersistenceError,
};

pub(crate) fn map_user_store_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            store_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            store_failed(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn map_post_store_error(error: PostPersistenceError) -> Error {
    match error {
        PostPersistenceError::Connection { message } => {
            store_unavailable(format!("post repository unavailable: {message}"))
        }
        PostPersistenceError::Query { message } => {
            store_failed(format!("post repository error: {message}"))
        }
    }
}

pub(crate) fn map_announce_error(error: AnnounceError) -> Error {
    Error::service_unavailable(format!("announcement failed: {error}")).with_details(json!({
        "code": "announce_failed",
    }))
}

pub(crate) fn map_import_source_error(error: ImportSourceError) -> Error {
    match error {
        ImportSourceError::NotFound { path } => {
            Error::not_found(format!("import file not found: {path}")).with_details(json!({
                "path": path,
                "code": "import_file_not_found",
            }))
        }
        ImportSourceError::Read { path, message } => {
            Error::service_unavailable(format!("failed to read {path}: {message}"))
                .with_details(json!({
                    "path": path,
                    "code": "import_file_unreadable",
                }))
        }
    }
}

fn store_unavailable(message: String) -> Error {
    Error::service_unavailable(message).with_details(json!({ "code": "store_unavailable" }))
}

fn store_failed(message: String) -> Error {
    Error::internal(message).with_details(json!({ "code": "store_failed" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserPersistenceError::connection("down"), ErrorCode::ServiceUnavailable, "store_unavailable")]
    #[case(UserPersistenceError::query("bad sql"), ErrorCode::InternalError, "store_failed")]
    fn user_store_errors_keep_their_kind(
        #[case] error: UserPersistenceError,
        #[case] code: ErrorCode,
        #[case] reason: &str,
    ) {
        let mapped = map_user_store_error(error);
        assert_eq!(mapped.code(), code);
        assert_eq!(mapped.reason(), Some(reason));
    }

    #[rstest]
    #[case(PostPersistenceError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(PostPersistenceError::query("bad sql"), ErrorCode::InternalError)]
    fn post_store_errors_keep_their_kind(
        #[case] error: PostPersistenceError,
        #[case] code: ErrorCode,
    ) {
        assert_eq!(map_post_store_error(error).code(), code);
    }

    #[rstest]
    fn announce_errors_are_unavailable() {
        let mapped = map_announce_error(AnnounceError::rejected("too big"));
        assert_eq!(mapped.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(mapped.reason(), Some("announce_failed"));
    }

    #[rstest]
    fn missing_import_file_is_not_found() {
        let mapped = map_import_source_error(ImportSourceError::not_found("users.csv"));
        assert_eq!(mapped.code(), ErrorCode::NotFound);
    }
}
