//! PostgreSQL adapters built on Diesel.
//!
//! Repositories translate between row structs and domain types and hold no
//! business rules. Row structs and table definitions stay private to this
//! module; every database failure is mapped onto the owning port's error.
//!
//! # Example
//!
//! ```rust,no_run
//! use chirp::outbound::persistence::{
//!     DbPool, DieselPostRepository, DieselUserRepository, PoolConfig,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/chirp")).await?;
//! let _users = DieselUserRepository::new(pool.clone());
//! let _posts = DieselPostRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_event_outbox;
mod diesel_post_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_event_outbox::DieselEventOutbox;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_async,
};
pub use pool::{DbPool, PoolConfig, PoolError};
