use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::service::TaskService;

/// Health check endpoint
///
/// Reports whether the API is up and whether its store answers.
#[get("/health")]
pub async fn health(service: web::Data<TaskService>) -> impl Responder {
    let database = match service.store().ping().await {
        Ok(()) => "connected",
        Err(e) => {
            log::warn!(
                "Health check could not reach the {} store: {}",
                service.store().backend(),
                e
            );
            "disconnected"
        }
    };

    HttpResponse::Ok().json(json!({
        "status": "ok",
        "database": database,
        "timestamp": Utc::now()
    }))
}
