//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: mutex-guarded in-process repositories for local runs and
//!   tests.
//! - **eligibility**: identity-eligibility checkers.
//!
//! Adapters translate between domain types and infrastructure
//! representations; they hold no business rules.

pub mod eligibility;
pub mod memory;
pub mod persistence;
