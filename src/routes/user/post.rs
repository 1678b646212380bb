use actix_web::{http::header::LOCATION, http::StatusCode, web, HttpRequest, HttpResponse};
use tera::Context;

use crate::{
    startup::MaxUploadSize,
    store::UserStore,
    templates::page,
    uploads::{read_submission, ImageStorage},
    users::{self, UserError},
};

const CREATE_FAILED: &str = "Failed to create user. Please try again.";

fn add_form(error: &str) -> HttpResponse {
    let mut context = Context::new();
    context.insert("error", error);
    page(StatusCode::OK, "add_user.html", &context)
}

pub async fn create_user(
    req: HttpRequest,
    payload: web::Payload,
    store: web::Data<dyn UserStore>,
    images: web::Data<ImageStorage>,
    max_upload_size: web::Data<MaxUploadSize>,
) -> HttpResponse {
    let submission = match read_submission(&req, payload, max_upload_size.0).await {
        Ok(submission) => submission,
        Err(rejected) => {
            tracing::warn!(error = ?rejected, "Rejected user submission");
            return add_form(&rejected.to_string());
        }
    };

    match users::create_user(store.get_ref(), &images, submission).await {
        Ok(_) => HttpResponse::Found()
            .insert_header((LOCATION, "/?success=User%20created%20successfully"))
            .finish(),
        Err(UserError::ValidationError(message)) => add_form(message),
        Err(e) => {
            tracing::error!(error = ?e, "Error creating user");
            add_form(CREATE_FAILED)
        }
    }
}
