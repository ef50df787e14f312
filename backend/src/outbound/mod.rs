//! Outbound adapters implementing the domain ports.
//!
//! - **memory**: process-local stores and a recording announcer
//! - **persistence**: PostgreSQL repositories and event outbox via Diesel
//! - **import_source**: capability-scoped file reads for directory imports
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business rules.

pub mod import_source;
pub mod memory;
pub mod persistence;
