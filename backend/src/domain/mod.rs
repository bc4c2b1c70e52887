//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the profile model and its update rules independently of
//! HTTP and storage. Adapters talk to the domain only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User / UserId: public projection of an account.
//! - Profile and friends: the profile aggregate and partial-update types.
//! - AvatarInput: the single avatar action an update performs.
//! - ProfileService: implementation of the profile driving ports.

pub mod avatar;
pub mod error;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod request_context;
pub mod trace_id;
pub mod user;

pub use self::avatar::{AvatarFolder, AvatarInput, AvatarUpload};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::profile::{
    Profile, ProfileChanges, ProfileId, ProfilePatch, ProfileView, ProfileWithOwner, SocialLink,
    SocialLinksInput,
};
pub use self::profile_service::ProfileService;
pub use self::request_context::RequestContext;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserValidationError};
