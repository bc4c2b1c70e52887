//! Process-local repository adapters.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! State lives behind a `std::sync::Mutex`; no guard is held across an
//! `.await`.

mod profile_repository;
mod user_repository;

pub use profile_repository::InMemoryProfileRepository;
pub use user_repository::InMemoryUserRepository;
