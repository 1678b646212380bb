use actix_web::{
    guard::GuardContext,
    http::{header::LOCATION, StatusCode},
    web, HttpRequest, HttpResponse,
};
use tera::Context;

use crate::routes::parse_id;
use crate::{
    startup::MaxUploadSize,
    store::UserStore,
    templates::{error_page, not_found_page, page},
    uploads::{read_submission, ImageStorage},
    users::{self, UserError},
};

const UPDATE_FAILED: &str = "Failed to update user. Please try again.";

/// HTML forms can only POST; `?_method=PUT` marks a POST as an edit.
pub fn is_method_override_put(ctx: &GuardContext<'_>) -> bool {
    ctx.head()
        .uri
        .query()
        .map(|query| {
            query
                .split('&')
                .any(|pair| pair.eq_ignore_ascii_case("_method=PUT"))
        })
        .unwrap_or(false)
}

async fn edit_form(store: &dyn UserStore, id: i32, error: &str) -> HttpResponse {
    match store.get_by_id(id).await {
        Ok(Some(user)) => {
            let mut context = Context::new();
            context.insert("user", &user);
            context.insert("error", error);
            page(StatusCode::OK, "edit_user.html", &context)
        }
        Ok(None) => not_found_page("User not found"),
        Err(e) => {
            tracing::error!(error = ?e, "Error fetching user for edit");
            error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch user for editing",
            )
        }
    }
}

pub async fn update_user(
    req: HttpRequest,
    id: web::Path<String>,
    payload: web::Payload,
    store: web::Data<dyn UserStore>,
    images: web::Data<ImageStorage>,
    max_upload_size: web::Data<MaxUploadSize>,
) -> HttpResponse {
    let Some(id) = parse_id(&id) else {
        return not_found_page("User not found");
    };

    let submission = match read_submission(&req, payload, max_upload_size.0).await {
        Ok(submission) => submission,
        Err(rejected) => {
            tracing::warn!(error = ?rejected, user_id = id, "Rejected user submission");
            return edit_form(store.get_ref(), id, &rejected.to_string()).await;
        }
    };

    match users::update_user(store.get_ref(), &images, id, submission).await {
        Ok(_) => HttpResponse::Found()
            .insert_header((LOCATION, "/?success=User%20updated%20successfully"))
            .finish(),
        Err(UserError::ValidationError(message)) => edit_form(store.get_ref(), id, message).await,
        Err(UserError::NotFound) => not_found_page("User not found"),
        Err(e) => {
            tracing::error!(error = ?e, user_id = id, "Error updating user");
            edit_form(store.get_ref(), id, UPDATE_FAILED).await
        }
    }
}
