//! HTTP inbound adapter exposing the REST endpoints.

use actix_web::web;

pub mod error;
pub mod feed;
pub mod follows;
pub mod health;
pub mod posts;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register extractor settings, the `/api/v1` scope and the health probes.
///
/// Callers register [`state::HttpState`] and [`health::HealthState`] as
/// `web::Data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(validation::query_payload_error))
        .service(
            web::scope("/api/v1")
                .service(posts::publish_post)
                .service(follows::follow_user)
                .service(feed::get_feed)
                .service(users::import_users),
        )
        .service(health::ready)
        .service(health::live);
}
