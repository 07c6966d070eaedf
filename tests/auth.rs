use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use taskpulse::auth::{AuthResponse, PasswordHasher, TokenIssuer};
use taskpulse::routes;
use taskpulse::service::TaskService;
use taskpulse::store::MemoryStore;

fn task_service() -> web::Data<TaskService> {
    web::Data::new(TaskService::new(
        Arc::new(MemoryStore::new()),
        TokenIssuer::new("integration-secret"),
        PasswordHasher::new(4),
    ))
}

async fn send(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    req: actix_http::Request,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[test_log::test(actix_rt::test)]
async fn test_register_and_login_flow() {
    let service = task_service();
    let app = test::init_service(
        App::new()
            .app_data(service.clone())
            .configure(routes::config),
    )
    .await;

    let register_payload = json!({
        "name": "Ana",
        "email": "a@x.com",
        "password": "pw1"
    });
    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(&register_payload)
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED, "Registration failed: {}", body);

    let registered: AuthResponse = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(registered.user.name, "Ana");
    assert_eq!(registered.user.email, "a@x.com");
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("password").is_none());

    // The token decodes to the stored user.
    let identity = service.tokens().verify(&registered.token).unwrap();
    let stored = service
        .store()
        .find_user_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(identity.id, stored.id);
    assert_eq!(identity.email, stored.email);

    // Same email again, different password.
    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({ "name": "Other", "email": "a@x.com", "password": "pw2" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Email already registered" }));

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "email": "a@x.com", "password": "pw1" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK, "Login failed: {}", body);

    let logged_in: AuthResponse = serde_json::from_value(body).unwrap();
    assert_eq!(logged_in.user, registered.user);
    assert_eq!(
        service.tokens().verify(&logged_in.token).unwrap().id,
        registered.user.id
    );
}

#[actix_rt::test]
async fn test_login_does_not_reveal_which_field_was_wrong() {
    let app = test::init_service(
        App::new()
            .app_data(task_service())
            .configure(routes::config),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({ "name": "Ana", "email": "a@x.com", "password": "pw1" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "email": "a@x.com", "password": "wrong" }))
        .to_request();
    let wrong_password = send(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "email": "nobody@x.com", "password": "pw1" }))
        .to_request();
    let unknown_email = send(&app, req).await;

    assert_eq!(wrong_password.0, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password.1, json!({ "error": "Invalid credentials" }));
}

#[actix_rt::test]
async fn test_invalid_registration_inputs() {
    let app = test::init_service(
        App::new()
            .app_data(task_service())
            .configure(routes::config),
    )
    .await;

    let test_cases = vec![
        (
            json!({ "email": "a@x.com", "password": "pw1" }),
            "missing name",
        ),
        (json!({ "name": "Ana", "password": "pw1" }), "missing email"),
        (json!({ "name": "Ana", "email": "a@x.com" }), "missing password"),
        (
            json!({ "name": "", "email": "a@x.com", "password": "pw1" }),
            "empty name",
        ),
        (
            json!({ "name": "Ana", "email": "a@x.com", "password": "" }),
            "empty password",
        ),
        (json!({}), "empty object"),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/users/register")
            .set_json(&payload)
            .to_request();
        let (status, body) = send(&app, req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "case: {}", description);
        assert_eq!(
            body,
            json!({ "error": "Missing required fields" }),
            "case: {}",
            description
        );
    }

    let req = test::TestRequest::post()
        .uri("/users/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[actix_rt::test]
async fn test_invalid_login_inputs() {
    let app = test::init_service(
        App::new()
            .app_data(task_service())
            .configure(routes::config),
    )
    .await;

    for payload in [
        json!({ "password": "pw1" }),
        json!({ "email": "a@x.com" }),
        json!({ "email": "", "password": "" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/users/login")
            .set_json(&payload)
            .to_request();
        let (status, body) = send(&app, req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert_eq!(body, json!({ "error": "Missing required fields" }));
    }
}

#[actix_rt::test]
async fn test_health_is_public() {
    let app = test::init_service(
        App::new()
            .app_data(task_service())
            .configure(routes::config),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}
