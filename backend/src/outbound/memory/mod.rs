//! In-process adapters for the driven ports.
//!
//! Used when no database is configured and throughout the integration
//! tests. Locks are only held inside synchronous sections, never across an
//! `.await`.

mod announcer;
mod posts;
mod users;

pub use announcer::InMemoryEventAnnouncer;
pub use posts::InMemoryPostRepository;
pub use users::InMemoryUserRepository;
