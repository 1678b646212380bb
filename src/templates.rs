use actix_web::{http::StatusCode, HttpResponse};
use once_cell::sync::Lazy;
use tera::{Context, Tera};

static TERA: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("index.html", include_str!("../templates/index.html")),
        ("add_user.html", include_str!("../templates/add_user.html")),
        ("edit_user.html", include_str!("../templates/edit_user.html")),
        ("user_detail.html", include_str!("../templates/user_detail.html")),
        ("404.html", include_str!("../templates/404.html")),
        ("error.html", include_str!("../templates/error.html")),
    ])
    .expect("Failed to register page templates");
    tera
});

pub fn render(template: &str, context: &Context) -> Result<String, tera::Error> {
    TERA.render(template, context)
}

/// Renders `template` into an HTML response. A rendering failure is logged and
/// answered with a bare 500.
pub fn page(status: StatusCode, template: &str, context: &Context) -> HttpResponse {
    match render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            tracing::error!(error = ?e, template, "Failed to render template");
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Something went wrong!")
        }
    }
}

pub fn not_found_page(message: &str) -> HttpResponse {
    let mut context = Context::new();
    context.insert("message", message);
    context.insert("back_url", "/");
    page(StatusCode::NOT_FOUND, "404.html", &context)
}

pub fn error_page(status: StatusCode, message: &str) -> HttpResponse {
    let mut context = Context::new();
    context.insert("error", message);
    context.insert("back_url", "/");
    page(status, "error.html", &context)
}
