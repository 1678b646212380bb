use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;

use crate::startup::ProcessStart;

#[derive(Serialize)]
struct Health {
    status: &'static str,
    timestamp: String,
    uptime: f64,
}

pub async fn health_check(started: web::Data<ProcessStart>) -> HttpResponse {
    HttpResponse::Ok().json(Health {
        status: "OK",
        timestamp: Utc::now().to_rfc3339(),
        uptime: started.0.elapsed().as_secs_f64(),
    })
}
