//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local store used when no database is configured
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//!
//! Adapters translate between domain types and infrastructure-specific
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
