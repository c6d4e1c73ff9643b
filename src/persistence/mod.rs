//! PostgreSQL persistence adapters for the users table.
//!
//! The HTTP layer depends only on the [`UserRepository`] port; this module
//! provides the Diesel-backed adapter used in production and an in-memory
//! adapter used by tests.

pub mod diesel_user_repository;
pub mod models;
pub mod pool;
pub mod schema;
pub mod user_repository;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolError};
pub use user_repository::{InMemoryUserRepository, UserPersistenceError, UserRepository};
