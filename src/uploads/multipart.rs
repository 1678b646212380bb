use actix_web::{
    http::header::CONTENT_TYPE,
    web::{self, BytesMut},
    HttpRequest,
};
use futures_util::{future::ready, stream::once, StreamExt};
use multer::{Constraints, Multipart, SizeLimit};

use super::{is_allowed_image, UploadRejected};
use crate::domain::{ImageUpload, UserSubmission};

pub const IMAGE_FIELD: &str = "profileImage";

// Room for the text fields and multipart framing on top of the image itself.
const FORM_OVERHEAD: usize = 64 * 1024;

/// `removeImage` arrives as a JSON boolean or as the form string `"true"`.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RemoveImage {
    Flag(bool),
    Text(String),
}

impl RemoveImage {
    fn requested(&self) -> bool {
        match self {
            RemoveImage::Flag(flag) => *flag,
            RemoveImage::Text(text) => text == "true",
        }
    }
}

/// Body of a JSON or `application/x-www-form-urlencoded` submission.
#[derive(serde::Deserialize)]
struct TextSubmission {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(rename = "removeImage")]
    remove_image: Option<RemoveImage>,
}

impl From<TextSubmission> for UserSubmission {
    fn from(body: TextSubmission) -> Self {
        UserSubmission {
            name: body.name,
            email: body.email,
            remove_image: body.remove_image.is_some_and(|r| r.requested()),
            image: None,
        }
    }
}

/// Reads a create/edit body: `multipart/form-data`, `application/json` or
/// `application/x-www-form-urlencoded`. Any attached image has already been
/// checked against the size limit and the image type policy when this
/// returns.
pub async fn read_submission(
    req: &HttpRequest,
    payload: web::Payload,
    max_upload_size: usize,
) -> Result<UserSubmission, UploadRejected> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let limit = max_upload_size.saturating_add(FORM_OVERHEAD);
    let body = read_body(payload, limit, max_upload_size).await?;

    let submission = if content_type.starts_with("multipart/form-data") {
        parse_multipart(&content_type, body, max_upload_size).await?
    } else if content_type.starts_with("application/json") {
        serde_json::from_slice::<TextSubmission>(&body)
            .map_err(|e| UploadRejected::Malformed(anyhow::anyhow!(e)))?
            .into()
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        serde_urlencoded::from_bytes::<TextSubmission>(&body)
            .map_err(|e| UploadRejected::Malformed(anyhow::anyhow!(e)))?
            .into()
    } else {
        return Err(UploadRejected::Malformed(anyhow::anyhow!(
            "Unsupported content type: {content_type:?}"
        )));
    };

    if let Some(image) = &submission.image {
        if !is_allowed_image(&image.original_filename, &image.content_type) {
            return Err(UploadRejected::InvalidType);
        }
    }

    Ok(submission)
}

async fn read_body(
    mut payload: web::Payload,
    limit: usize,
    max_upload_size: usize,
) -> Result<web::Bytes, UploadRejected> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| UploadRejected::Malformed(anyhow::anyhow!(e.to_string())))?;
        if body.len() + chunk.len() > limit {
            return Err(UploadRejected::TooLarge {
                max_bytes: max_upload_size,
            });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

async fn parse_multipart(
    content_type: &str,
    body: web::Bytes,
    max_upload_size: usize,
) -> Result<UserSubmission, UploadRejected> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| UploadRejected::Malformed(anyhow::anyhow!(e)))?;
    let constraints = Constraints::new()
        .size_limit(SizeLimit::new().for_field(IMAGE_FIELD, max_upload_size as u64));
    let stream = once(ready(Ok::<_, std::io::Error>(body)));
    let mut multipart = Multipart::with_constraints(stream, boundary, constraints);

    let rejected = move |e: multer::Error| reject(e, max_upload_size);
    let mut submission = UserSubmission::default();
    while let Some(field) = multipart.next_field().await.map_err(rejected)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" => submission.name = field.text().await.map_err(rejected)?,
            "email" => submission.email = field.text().await.map_err(rejected)?,
            "removeImage" => submission.remove_image = field.text().await.map_err(rejected)? == "true",
            IMAGE_FIELD => {
                let original_filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .map(|mime| mime.to_string())
                    .unwrap_or_default();
                let bytes = field.bytes().await.map_err(rejected)?;
                // Browsers send an empty file part when nothing was chosen.
                if !original_filename.is_empty() {
                    submission.image = Some(ImageUpload {
                        original_filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}

fn reject(error: multer::Error, max_upload_size: usize) -> UploadRejected {
    match error {
        multer::Error::FieldSizeExceeded { .. } | multer::Error::StreamSizeExceeded { .. } => {
            UploadRejected::TooLarge {
                max_bytes: max_upload_size,
            }
        }
        other => UploadRejected::Malformed(anyhow::anyhow!(other)),
    }
}
