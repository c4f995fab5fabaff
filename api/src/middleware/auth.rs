//! Session-token middleware for protecting API endpoints.
//!
//! Two guards share one verification path through the core token service:
//! [`UserAuth`] reads the standard `Authorization: Bearer` header for
//! patient routes, [`DoctorAuth`] reads the doctor panel's `dtoken` header.
//! Each injects a caller context into request extensions for handlers to
//! extract. A missing, expired or cross-panel token answers 401 with the
//! usual response envelope instead of letting the request through.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use mb_core::services::{Claims, TokenRole, TokenService};
use mb_shared::ApiResponse;

/// Reply body for every rejected request, matching what the frontends
/// already expect from the API.
pub const NOT_AUTHORIZED: &str = "Not Authorized. Login Again";

/// Patient identity injected into requests by [`UserAuth`]
#[derive(Debug, Clone)]
pub struct UserContext {
    /// Account id from the token's subject claim
    pub user_id: Uuid,
    /// Token id, for request tracing
    pub jti: String,
}

/// Doctor identity injected into requests by [`DoctorAuth`]
#[derive(Debug, Clone)]
pub struct DoctorContext {
    /// Doctor id from the token's subject claim
    pub doctor_id: Uuid,
    /// Token id, for request tracing
    pub jti: String,
}

/// Middleware factory guarding patient routes
pub struct UserAuth {
    token_service: Arc<TokenService>,
}

impl UserAuth {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for UserAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = UserAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(UserAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// Patient-route middleware service
pub struct UserAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for UserAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => return Ok(unauthorized(req)),
            };

            match verify_as(&token_service, &token, TokenRole::User) {
                Some(claims) => match claims.subject_id() {
                    Ok(user_id) => {
                        req.extensions_mut().insert(UserContext {
                            user_id,
                            jti: claims.jti,
                        });
                    }
                    Err(_) => return Ok(unauthorized(req)),
                },
                None => return Ok(unauthorized(req)),
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Middleware factory guarding doctor-panel routes
pub struct DoctorAuth {
    token_service: Arc<TokenService>,
}

impl DoctorAuth {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for DoctorAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = DoctorAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DoctorAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// Doctor-route middleware service
pub struct DoctorAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for DoctorAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);

        Box::pin(async move {
            let token = match extract_doctor_token(&req) {
                Some(token) => token,
                None => return Ok(unauthorized(req)),
            };

            match verify_as(&token_service, &token, TokenRole::Doctor) {
                Some(claims) => match claims.subject_id() {
                    Ok(doctor_id) => {
                        req.extensions_mut().insert(DoctorContext {
                            doctor_id,
                            jti: claims.jti,
                        });
                    }
                    Err(_) => return Ok(unauthorized(req)),
                },
                None => return Ok(unauthorized(req)),
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Verifies `token` and checks it was issued for `role`, logging the
/// reason when it was not.
fn verify_as(token_service: &TokenService, token: &str, role: TokenRole) -> Option<Claims> {
    match token_service.verify_role(token, role) {
        Ok(claims) => Some(claims),
        Err(error) => {
            log::warn!("Rejected {} token: {}", role.as_str(), error);
            None
        }
    }
}

/// Short-circuits the request with the standard 401 envelope.
fn unauthorized<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    let response = HttpResponse::Unauthorized()
        .json(ApiResponse::declined(NOT_AUTHORIZED))
        .map_into_right_body();
    req.into_response(response)
}

/// Extracts the Bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Extracts the raw token from the doctor panel's `dtoken` header
fn extract_doctor_token(req: &ServiceRequest) -> Option<String> {
    let token = req.headers().get("dtoken")?.to_str().ok()?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

impl FromRequest for UserContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<UserContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized(NOT_AUTHORIZED));

        ready(result)
    }
}

impl FromRequest for DoctorContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<DoctorContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized(NOT_AUTHORIZED));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();

        assert_eq!(
            extract_bearer_token(&req),
            Some("test_token_123".to_string())
        );

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_extract_doctor_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header(("dtoken", "raw_token_456"))
            .to_srv_request();

        assert_eq!(extract_doctor_token(&req), Some("raw_token_456".to_string()));

        let req_blank = test::TestRequest::default()
            .insert_header(("dtoken", "  "))
            .to_srv_request();

        assert_eq!(extract_doctor_token(&req_blank), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_doctor_token(&req_no_header), None);
    }

    #[test]
    fn test_role_check_separates_panels() {
        use mb_core::services::TokenServiceConfig;

        let service = TokenService::new(TokenServiceConfig::default());
        let token = service.issue(Uuid::new_v4(), TokenRole::User).unwrap();

        assert!(verify_as(&service, &token, TokenRole::User).is_some());
        assert!(verify_as(&service, &token, TokenRole::Doctor).is_none());
        assert!(verify_as(&service, "garbage", TokenRole::User).is_none());
    }
}
