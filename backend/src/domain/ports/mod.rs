//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`ProfileQuery`], [`ProfileCommand`]) are what inbound
//! adapters call. Driven ports ([`UserRepository`], [`ProfileRepository`],
//! [`AvatarStore`]) are what outbound adapters implement; each exposes a
//! typed error so adapters map failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod avatar_store;
mod profile_command;
mod profile_query;
mod profile_repository;
mod user_repository;

#[cfg(test)]
pub use avatar_store::MockAvatarStore;
pub use avatar_store::{AvatarStore, AvatarStoreError, StoredAvatar};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::{ProfileCommand, UpdateProfileRequest};
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
