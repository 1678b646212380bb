use actix_web::{web, HttpResponse};

use super::ApiError;
use crate::{routes::parse_id, store::UserStore};

pub async fn api_get_users(store: web::Data<dyn UserStore>) -> Result<HttpResponse, ApiError> {
    let users = store
        .get_all()
        .await
        .map_err(|e| ApiError::UnexpectedError(e.into()))?;

    Ok(HttpResponse::Ok().json(users))
}

pub async fn api_get_user(
    id: web::Path<String>,
    store: web::Data<dyn UserStore>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::NotFound)?;

    match store
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::UnexpectedError(e.into()))?
    {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(ApiError::NotFound),
    }
}
