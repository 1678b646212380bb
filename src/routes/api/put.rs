use actix_web::{web, HttpRequest, HttpResponse};

use super::ApiError;
use crate::{
    routes::parse_id,
    startup::MaxUploadSize,
    store::UserStore,
    uploads::{read_submission, ImageStorage},
    users,
};

/// Accepts the same multipart form as the HTML edit, or a JSON body of
/// `{name, email, removeImage}`.
pub async fn api_update_user(
    req: HttpRequest,
    id: web::Path<String>,
    payload: web::Payload,
    store: web::Data<dyn UserStore>,
    images: web::Data<ImageStorage>,
    max_upload_size: web::Data<MaxUploadSize>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::NotFound)?;

    let submission = read_submission(&req, payload, max_upload_size.0)
        .await
        .map_err(|rejected| ApiError::ValidationError(rejected.to_string()))?;

    let user = users::update_user(store.get_ref(), &images, id, submission).await?;

    Ok(HttpResponse::Ok().json(user))
}
