use actix_web::{http::StatusCode, web, HttpResponse};
use tera::Context;

use crate::routes::{parse_id, PageError};
use crate::{
    store::UserStore,
    templates::{not_found_page, page},
};

pub async fn view_user(
    id: web::Path<String>,
    store: web::Data<dyn UserStore>,
) -> Result<HttpResponse, PageError> {
    let Some(id) = parse_id(&id) else {
        return Ok(not_found_page("User not found"));
    };

    let user = store
        .get_by_id(id)
        .await
        .map_err(|e| PageError::unexpected("Failed to fetch user details", e))?;

    match user {
        Some(user) => {
            let mut context = Context::new();
            context.insert("user", &user);
            Ok(page(StatusCode::OK, "user_detail.html", &context))
        }
        None => Ok(not_found_page("User not found")),
    }
}

pub async fn edit_user_form(
    id: web::Path<String>,
    store: web::Data<dyn UserStore>,
) -> Result<HttpResponse, PageError> {
    let Some(id) = parse_id(&id) else {
        return Ok(not_found_page("User not found"));
    };

    let user = store
        .get_by_id(id)
        .await
        .map_err(|e| PageError::unexpected("Failed to fetch user for editing", e))?;

    match user {
        Some(user) => {
            let mut context = Context::new();
            context.insert("user", &user);
            context.insert("error", &None::<String>);
            Ok(page(StatusCode::OK, "edit_user.html", &context))
        }
        None => Ok(not_found_page("User not found")),
    }
}
