use actix_web::{http::StatusCode, web, HttpResponse};
use tera::Context;

use crate::{domain::User, store::UserStore, templates::page};

#[derive(serde::Deserialize)]
pub struct Banner {
    success: Option<String>,
    error: Option<String>,
}

pub async fn list_users(
    banner: web::Query<Banner>,
    store: web::Data<dyn UserStore>,
) -> HttpResponse {
    let banner = banner.into_inner();
    let mut context = Context::new();
    context.insert("success", &banner.success);

    match store.get_all().await {
        Ok(users) => {
            context.insert("users", &users);
            context.insert("error", &banner.error);
        }
        Err(e) => {
            tracing::error!(error = ?e, "Error fetching users");
            context.insert("users", &Vec::<User>::new());
            context.insert("error", "Failed to fetch users");
        }
    }

    page(StatusCode::OK, "index.html", &context)
}

pub async fn add_user_form() -> HttpResponse {
    let mut context = Context::new();
    context.insert("error", &None::<String>);
    page(StatusCode::OK, "add_user.html", &context)
}
