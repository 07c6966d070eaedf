use crate::{
    auth::{Credentials, LoginRequest, RegisterRequest, Registration},
    error::AppError,
    service::TaskService,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a new user account and returns it together with an authentication token.
///
/// ## Responses:
/// - `201 Created`: `{ "user": {...}, "token": "..." }`.
/// - `400 Bad Request`: A field is missing or the email is already registered.
/// - `500 Internal Server Error`: Store or hashing failure.
#[post("/register")]
pub async fn register(
    service: web::Data<TaskService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let registration = Registration::try_from(register_data.into_inner())?;
    let response = service.register(registration).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Login user
///
/// Authenticates a user and returns an authentication token.
///
/// ## Responses:
/// - `200 OK`: `{ "user": {...}, "token": "..." }`.
/// - `400 Bad Request`: A field is missing or the credentials do not match.
/// - `500 Internal Server Error`: Store failure.
#[post("/login")]
pub async fn login(
    service: web::Data<TaskService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let credentials = Credentials::try_from(login_data.into_inner())?;
    let response = service.login(credentials).await?;
    Ok(HttpResponse::Ok().json(response))
}
