//! Profile HTTP handlers.
//!
//! ```text
//! GET   /api/v1/profile/u/{username}   public profile by username
//! GET   /api/v1/profile/id/{userId}    profile or placeholder by owner id
//! GET   /api/v1/profile/me             caller's profile, or null
//! PATCH /api/v1/profile/me             create or merge the caller's profile
//! ```

use actix_web::http::header;
use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse, Scope, get, patch, web};

use crate::domain::Error;
use crate::domain::ports::UpdateProfileRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::profile_dto::{
    ProfileEnvelope, UpdateProfileBody, UpdateProfileForm,
};
use crate::inbound::http::profile_form::decode_profile_form;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{malformed_body, parse_user_id, unsupported_media_type};

/// Mount point for every profile route.
pub const PROFILE_SCOPE: &str = "/api/v1/profile";

/// Scope carrying all profile handlers.
pub fn profile_scope() -> Scope {
    web::scope(PROFILE_SCOPE)
        .service(get_my_profile)
        .service(update_my_profile)
        .service(get_profile_by_username)
        .service(get_profile_by_user_id)
}

/// Public profile lookup by username.
#[utoipa::path(
    get,
    path = "/api/v1/profile/u/{username}",
    params(("username" = String, Path, description = "Unique username of the profile owner")),
    responses(
        (status = 200, description = "Profile with its owner", body = ProfileEnvelope),
        (status = 404, description = "Unknown user or no profile yet", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tags = ["profile"],
    security([]),
    operation_id = "getProfileByUsername"
)]
#[get("/u/{username}")]
pub async fn get_profile_by_username(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let username = path.into_inner();
    let profile = state.profiles.by_username(&username).await?;
    Ok(HttpResponse::Ok().json(ProfileEnvelope::with_profile(profile)))
}

/// Profile lookup by owner id.
///
/// Known users without a stored profile get a placeholder with empty
/// fields.
#[utoipa::path(
    get,
    path = "/api/v1/profile/id/{userId}",
    params(("userId" = String, Path, description = "Owner's user id (UUID)")),
    responses(
        (status = 200, description = "Stored or placeholder profile", body = ProfileEnvelope),
        (status = 400, description = "Malformed user id", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tags = ["profile"],
    security([]),
    operation_id = "getProfileByUserId"
)]
#[get("/id/{user_id}")]
pub async fn get_profile_by_user_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = parse_user_id(&path.into_inner(), "userId")?;
    let view = state.profiles.by_owner_id(&owner).await?;
    Ok(HttpResponse::Ok().json(ProfileEnvelope::with_profile(view)))
}

/// The caller's own profile; `profile` is `null` until the first update.
#[utoipa::path(
    get,
    path = "/api/v1/profile/me",
    responses(
        (status = 200, description = "Caller's profile or null", body = ProfileEnvelope),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tags = ["profile"],
    operation_id = "getMyProfile"
)]
#[get("/me")]
pub async fn get_my_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let context = session.require_context()?;
    let envelope = match state.profiles.mine(&context).await? {
        Some(profile) => ProfileEnvelope::with_profile(profile),
        None => ProfileEnvelope::empty(),
    };
    Ok(HttpResponse::Ok().json(envelope))
}

/// Create or partially update the caller's profile.
///
/// Accepts JSON or `multipart/form-data`. Only non-empty fields are
/// written; a binary `avatar` part is uploaded and takes precedence over an
/// `avatar` URL.
#[utoipa::path(
    patch,
    path = "/api/v1/profile/me",
    request_body(
        description = "Fields to set; omitted or empty fields are left unchanged",
        content(
            (UpdateProfileBody = "application/json"),
            (UpdateProfileForm = "multipart/form-data")
        )
    ),
    responses(
        (status = 200, description = "Profile after the update", body = ProfileEnvelope),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "Caller's account no longer exists", body = ErrorResponse),
        (status = 413, description = "Body exceeds the upload limit"),
        (status = 500, description = "Avatar upload failed", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tags = ["profile"],
    operation_id = "updateMyProfile"
)]
#[patch("/me")]
pub async fn update_my_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    body: Bytes,
) -> ApiResult<HttpResponse> {
    let context = session.require_context()?;
    let update = decode_update(&request, body).await?;
    let profile = state.profile_updates.update_mine(&context, update).await?;
    Ok(HttpResponse::Ok().json(ProfileEnvelope::with_profile(profile)))
}

async fn decode_update(request: &HttpRequest, body: Bytes) -> Result<UpdateProfileRequest, Error> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "multipart/form-data" => decode_profile_form(content_type, body).await,
        "" | "application/json" => decode_json(&body),
        other if other.ends_with("+json") => decode_json(&body),
        other => Err(unsupported_media_type(other)),
    }
}

fn decode_json(body: &[u8]) -> Result<UpdateProfileRequest, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(UpdateProfileRequest::default());
    }
    serde_json::from_slice::<UpdateProfileBody>(body)
        .map(UpdateProfileRequest::from)
        .map_err(malformed_body)
}
