//! User directory import endpoint.
//!
//! ```text
//! POST /api/v1/users/import {"filePath":"/srv/chirp/users.csv"}
//! ```

use std::path::PathBuf;

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ImportReport;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, ImportReportSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

const FILE_PATH: FieldName = FieldName::new("filePath");

/// Request body naming the directory file to import.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportUsersBody {
    /// Server-side path of a `name,follow1,follow2` file.
    #[schema(example = "/srv/chirp/users.csv")]
    pub file_path: Option<String>,
}

/// Import users and follow edges from a directory file.
#[utoipa::path(
    post,
    path = "/api/v1/users/import",
    request_body = ImportUsersBody,
    responses(
        (status = 200, description = "Import report", body = ImportReportSchema),
        (status = 400, description = "Invalid line or request", body = ErrorSchema),
        (status = 404, description = "File not found", body = ErrorSchema),
        (status = 503, description = "File or store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "importUsers"
)]
#[post("/users/import")]
pub async fn import_users(
    state: web::Data<HttpState>,
    payload: web::Json<ImportUsersBody>,
) -> ApiResult<web::Json<ImportReport>> {
    let path = PathBuf::from(require(payload.into_inner().file_path, FILE_PATH)?);
    let report = state.directory.import_file(&path).await?;
    Ok(web::Json(report))
}
