use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::fmt;

use crate::auth::token::{Identity, TokenError, TokenIssuer};
use crate::error::AppError;
use crate::service::TaskService;

/// Why the gatekeeper refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header at all.
    NoCredential,
    /// A header that is not exactly `Bearer <token>`.
    MalformedHeader,
    /// A well-shaped header whose token failed verification.
    Token(TokenError),
}

impl AuthError {
    pub fn client_message(&self) -> &'static str {
        match self {
            AuthError::NoCredential => "No token provided",
            AuthError::MalformedHeader => "Malformed authorization header",
            AuthError::Token(_) => "Invalid token",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthError::Token(kind) => write!(f, "{} ({})", self.client_message(), kind),
            _ => write!(f, "{}", self.client_message()),
        }
    }
}

/// Extracts the token from an `Authorization` header value.
///
/// The value must be exactly two space-separated parts, the first being `Bearer`.
pub fn bearer_token(header_value: Option<&str>) -> Result<&str, AuthError> {
    let value = header_value.ok_or(AuthError::NoCredential)?;
    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(*token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Verifies the request's bearer credential into an identity.
pub fn authenticate(req: &ServiceRequest, tokens: &TokenIssuer) -> Result<Identity, AuthError> {
    let header_value = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedHeader)?),
        None => None,
    };
    let token = bearer_token(header_value)?;
    tokens.verify(token).map_err(AuthError::Token)
}

/// Rejects requests without a valid bearer token before they reach a handler.
///
/// On success the decoded [`Identity`] is attached to the request extensions.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = match req.app_data::<web::Data<TaskService>>() {
            Some(tasks) => authenticate(&req, tasks.tokens()).map_err(AppError::from),
            None => Err(AppError::InternalServerError(
                "TaskService is not registered as app data".into(),
            )),
        };

        match outcome {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(app_err) => {
                log::debug!("{} {} rejected: {}", req.method(), req.path(), app_err);
                // Rejections are answered here so they never reach the wrapped service.
                let response = req.error_response(app_err).map_into_right_body();
                Box::pin(ready(Ok(response)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use actix_web::test::TestRequest;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("gatekeeper_secret")
    }

    fn valid_token() -> String {
        issuer()
            .issue(&User {
                id: 3,
                name: "Bo".to_string(),
                email: "b@x.com".to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_bearer_token_shapes() {
        assert_eq!(bearer_token(None), Err(AuthError::NoCredential));
        assert_eq!(bearer_token(Some("Bearer abc")), Ok("abc"));
        assert_eq!(bearer_token(Some("bearer abc")), Err(AuthError::MalformedHeader));
        assert_eq!(bearer_token(Some("Bearer")), Err(AuthError::MalformedHeader));
        assert_eq!(bearer_token(Some("Bearer a b")), Err(AuthError::MalformedHeader));
        assert_eq!(bearer_token(Some("Basic abc")), Err(AuthError::MalformedHeader));
        assert_eq!(bearer_token(Some("Bearer  abc")), Err(AuthError::MalformedHeader));
    }

    #[test]
    fn test_authenticate_attaches_identity() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", valid_token())))
            .to_srv_request();

        let identity = authenticate(&req, &issuer()).unwrap();
        assert_eq!(identity.id, 3);
        assert_eq!(identity.email, "b@x.com");
    }

    #[test]
    fn test_authenticate_failures() {
        let req = TestRequest::default().to_srv_request();
        assert_eq!(authenticate(&req, &issuer()), Err(AuthError::NoCredential));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, valid_token()))
            .to_srv_request();
        assert_eq!(authenticate(&req, &issuer()), Err(AuthError::MalformedHeader));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", valid_token())))
            .to_srv_request();
        assert_eq!(
            authenticate(&req, &TokenIssuer::new("other_secret")),
            Err(AuthError::Token(TokenError::InvalidSignature))
        );
    }
}
