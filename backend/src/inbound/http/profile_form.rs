//! Decoding of `multipart/form-data` profile updates.
//!
//! Text parts map onto the same fields as the JSON body. A part named
//! `avatar` that carries a filename is a binary upload; without a filename
//! it is an avatar URL. `socialLinks` arrives as JSON text and is parsed
//! later by the domain.

use actix_web::web::Bytes;
use futures_util::future::ready;
use futures_util::stream::once;
use tracing::debug;

use crate::domain::ports::UpdateProfileRequest;
use crate::domain::{AvatarInput, AvatarUpload, Error, ProfilePatch, SocialLinksInput};

use super::validation::malformed_body;

/// Raw parts collected from the form before the avatar is resolved.
#[derive(Debug, Default)]
struct ProfileForm {
    patch: ProfilePatch,
    avatar_upload: Option<AvatarUpload>,
    avatar_url: Option<String>,
}

impl ProfileForm {
    fn into_request(self) -> UpdateProfileRequest {
        UpdateProfileRequest {
            patch: self.patch,
            avatar: AvatarInput::resolve(self.avatar_upload, self.avatar_url),
        }
    }
}

fn map_multer_error(error: multer::Error) -> Error {
    malformed_body(error)
}

/// Decode a buffered multipart body into an update request.
pub(crate) async fn decode_profile_form(
    content_type: &str,
    body: Bytes,
) -> Result<UpdateProfileRequest, Error> {
    let boundary = multer::parse_boundary(content_type).map_err(map_multer_error)?;
    let stream = once(ready(Ok::<_, std::io::Error>(body)));
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut form = ProfileForm::default();
    while let Some(field) = multipart.next_field().await.map_err(map_multer_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == "avatar" && field.file_name().is_some() {
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().map(ToString::to_string);
            let bytes = field.bytes().await.map_err(map_multer_error)?;
            let mut upload = AvatarUpload::new(bytes);
            if let Some(file_name) = file_name {
                upload = upload.with_file_name(file_name);
            }
            if let Some(content_type) = content_type {
                upload = upload.with_content_type(content_type);
            }
            form.avatar_upload = Some(upload);
            continue;
        }

        let text = field.text().await.map_err(map_multer_error)?;
        match name.as_str() {
            "bio" => form.patch.bio = Some(text),
            "title" => form.patch.title = Some(text),
            "resume" => form.patch.resume = Some(text),
            "locations" => form.patch.locations = Some(text),
            "socialLinks" => form.patch.social_links = Some(SocialLinksInput::Encoded(text)),
            "avatar" => form.avatar_url = Some(text),
            other => debug!(field = other, "ignoring unknown profile form field"),
        }
    }

    Ok(form.into_request())
}
