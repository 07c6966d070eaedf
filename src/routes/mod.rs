pub mod health;
pub mod tasks;
pub mod users;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Registers every route of the API.
///
/// `/tasks` sits behind `AuthMiddleware`; `/users` and `/health` are public.
/// The app must carry a `web::Data<TaskService>`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(health::health)
        .service(
            web::scope("/users")
                .service(users::register)
                .service(users::login),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::create_task)
                .service(tasks::list_tasks)
                .service(tasks::advance_status),
        );
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid JSON body: {}", err)).into()
}
