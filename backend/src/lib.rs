//! TalentLayer profile service.
//!
//! Owners read and update their professional profile, and anyone can look a
//! profile up by username or user id. The crate follows a hexagonal layout:
//! [`domain`] holds the profile rules and ports, [`inbound`] the HTTP
//! adapter and [`outbound`] the PostgreSQL, in-memory and Cloudinary
//! adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
pub use settings::AppSettings;
