use actix_web::HttpResponse;

use crate::templates::not_found_page;

pub async fn not_found() -> HttpResponse {
    not_found_page("The page you are looking for does not exist.")
}
