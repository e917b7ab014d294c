//! SQLite storage implementation for Tripfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `tripfolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations (schema + catalog seed)
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. All other crates are database-agnostic and work with traits.
//!
//! ```text
//!       core (domain)
//!             │
//!             ▼
//!    storage-sqlite (this crate)
//!             │
//!             ▼
//!         SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
mod utils;

// Repository implementations
pub mod budget;
pub mod catalog;
pub mod itinerary;
pub mod sharing;
pub mod trips;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from tripfolio-core for convenience
pub use tripfolio_core::errors::{DatabaseError, Error, Result};
