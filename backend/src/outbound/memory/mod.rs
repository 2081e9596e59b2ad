//! In-memory adapters for development and tests.
//!
//! Data lives for the lifetime of the process. The server falls back to
//! these adapters when no database URL is configured.

mod user_repository;

pub use user_repository::InMemoryUserRepository;
