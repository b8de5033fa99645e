//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories backed by `diesel-async` with `bb8` pooling. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay private to this
//! module; only the repositories, the pool and the migration runner are
//! exported.
//!
//! # Example
//!
//! ```no_run
//! use voting_backend::outbound::persistence::{DbPool, DieselTopicRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), voting_backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/voting")).await?;
//! let topics = DieselTopicRepository::new(pool);
//! # let _ = topics;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_topic_repository;
mod diesel_vote_repository;
mod diesel_voting_session_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_topic_repository::DieselTopicRepository;
pub use diesel_vote_repository::DieselVoteRepository;
pub use diesel_voting_session_repository::DieselVotingSessionRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
