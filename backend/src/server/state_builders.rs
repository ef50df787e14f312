//! Builders wiring driven adapters into the HTTP state.
//!
//! Adapters are chosen once at startup: Diesel-backed when a database URL is
//! configured, in-memory otherwise. The services are generic over their
//! ports, so each adapter family goes through [`build_http_state`] to be
//! erased behind the driving-port trait objects.

use std::num::NonZeroUsize;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use crate::domain::ports::{EventAnnouncer, PostRepository, UserRepository};
use crate::domain::{
    FeedAssemblyService, PostPublicationService, RelationshipService, UserDirectoryService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::import_source::CapStdImportSource;
use crate::outbound::memory::{
    InMemoryEventAnnouncer, InMemoryPostRepository, InMemoryUserRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselEventOutbox, DieselPostRepository, DieselUserRepository, MigrationError,
    PoolConfig, PoolError, run_pending_migrations_async,
};

use super::config::{ServerSettings, SettingsError};

/// Failures raised while preparing the server state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartupError {
    /// Settings could not be interpreted.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// Migrations failed.
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Wire the four services over one adapter family.
///
/// The user repository is shared by every service; the directory service
/// reads files through [`CapStdImportSource`].
pub fn build_http_state<U, P, A>(
    users: Arc<U>,
    posts: Arc<P>,
    announcer: Arc<A>,
    clock: Arc<dyn Clock>,
    fanout_limit: NonZeroUsize,
) -> HttpState
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
    A: EventAnnouncer + 'static,
{
    let publication = PostPublicationService::new(
        Arc::clone(&users),
        Arc::clone(&posts),
        Arc::clone(&announcer),
        clock,
    );
    let relationships = RelationshipService::new(Arc::clone(&users), announcer);
    let feed = FeedAssemblyService::new(Arc::clone(&users), posts).with_fanout_limit(fanout_limit);
    let directory = UserDirectoryService::new(users, Arc::new(CapStdImportSource::new()));

    HttpState::new(
        Arc::new(publication),
        Arc::new(relationships),
        Arc::new(feed),
        Arc::new(directory),
    )
}

/// State backed by fresh in-memory adapters.
#[must_use]
pub fn in_memory_http_state(fanout_limit: NonZeroUsize) -> HttpState {
    build_http_state(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemoryEventAnnouncer::new()),
        Arc::new(DefaultClock),
        fanout_limit,
    )
}

/// Apply migrations and open a pool for `database_url`.
///
/// # Errors
///
/// Returns [`StartupError::Migrations`] or [`StartupError::Pool`] when the
/// database cannot be prepared.
pub async fn connect_database(
    database_url: &str,
    max_connections: u32,
) -> Result<DbPool, StartupError> {
    run_pending_migrations_async(database_url.to_owned()).await?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_connections)).await?;
    Ok(pool)
}

/// State backed by the Diesel adapters sharing `pool`.
#[must_use]
pub fn diesel_http_state(pool: &DbPool, fanout_limit: NonZeroUsize) -> HttpState {
    build_http_state(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselPostRepository::new(pool.clone())),
        Arc::new(DieselEventOutbox::new(pool.clone())),
        Arc::new(DefaultClock),
        fanout_limit,
    )
}

/// Choose adapters according to `settings`.
///
/// # Errors
///
/// Propagates invalid settings and database preparation failures.
pub async fn http_state_from_settings(
    settings: &ServerSettings,
) -> Result<HttpState, StartupError> {
    let fanout_limit = settings.feed_fanout_limit()?;
    match settings.database_url() {
        Some(url) => {
            let pool = connect_database(url, settings.db_max_connections()?).await?;
            info!(fanout_limit = fanout_limit.get(), "using PostgreSQL adapters");
            Ok(diesel_http_state(&pool, fanout_limit))
        }
        None => {
            info!(
                fanout_limit = fanout_limit.get(),
                "no database configured; using in-memory adapters"
            );
            Ok(in_memory_http_state(fanout_limit))
        }
    }
}
