//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the profile and health endpoints together with the
//! envelope, profile and error schemas they exchange. Session cookies are
//! issued by the authentication service; this API only reads them.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::error::{ErrorResponse, ResponseStatus};
use crate::inbound::http::profile_dto::{
    EnvelopeStatus, ProfileData, ProfileEnvelope, ProfileResponse, SocialLinkDto,
    SocialLinksField, UpdateProfileBody, UpdateProfileForm, UserResponse,
};
use crate::inbound::http::schemas::ErrorCodeSchema;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the TalentLayer authentication service.",
            ))),
        );
    }
}

/// OpenAPI document for the profile API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "TalentLayer profile API",
        description = "Public profile lookups and self-service profile updates for TalentLayer users.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::profile::get_profile_by_username,
        crate::inbound::http::profile::get_profile_by_user_id,
        crate::inbound::http::profile::get_my_profile,
        crate::inbound::http::profile::update_my_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ProfileEnvelope,
        ProfileData,
        EnvelopeStatus,
        ProfileResponse,
        UserResponse,
        SocialLinkDto,
        SocialLinksField,
        UpdateProfileBody,
        UpdateProfileForm,
        ErrorResponse,
        ErrorCodeSchema,
        ResponseStatus,
    )),
    tags(
        (name = "profile", description = "Profile lookups and updates"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
