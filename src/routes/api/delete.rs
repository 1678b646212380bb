use actix_web::{web, HttpResponse};

use super::ApiError;
use crate::{routes::parse_id, store::UserStore, uploads::ImageStorage, users};

pub async fn api_delete_user(
    id: web::Path<String>,
    store: web::Data<dyn UserStore>,
    images: web::Data<ImageStorage>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::NotFound)?;

    users::delete_user(store.get_ref(), &images, id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "User deleted successfully"})))
}
