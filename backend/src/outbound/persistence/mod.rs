//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the user and profile repository ports backed
//! by PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures map to port error types;
//!   driver detail is logged, not returned.
//!
//! ```ignore
//! use talentlayer_backend::outbound::persistence::{
//!     DbPool, DieselProfileRepository, PoolConfig, run_migrations,
//! };
//!
//! run_migrations("postgres://localhost/talentlayer").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/talentlayer")).await?;
//! let profiles = DieselProfileRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_profile_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
