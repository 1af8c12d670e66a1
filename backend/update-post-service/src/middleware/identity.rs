use crate::error::AppError;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use serde_json::Value;
use std::future::{ready, Ready};

/// Header carrying the API Gateway request context (Lambda Web Adapter).
pub const REQUEST_CONTEXT_HEADER: &str = "x-amzn-request-context";

/// Claim locations, REST API authorizers first, then HTTP API JWT authorizers.
const USERNAME_CLAIM_POINTERS: &[&str] = &[
    "/authorizer/claims/cognito:username",
    "/authorizer/claims/username",
    "/authorizer/jwt/claims/cognito:username",
    "/authorizer/jwt/claims/username",
];

/// Source of the authenticated caller's username.
///
/// Registered as `web::Data<dyn IdentityExtractor>`; when none is registered
/// [`RequestContextIdentity`] is used.
pub trait IdentityExtractor: Send + Sync {
    fn username(&self, req: &HttpRequest) -> Option<String>;
}

/// Reads the username from the gateway authorizer claims.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestContextIdentity;

impl IdentityExtractor for RequestContextIdentity {
    fn username(&self, req: &HttpRequest) -> Option<String> {
        let raw = req.headers().get(REQUEST_CONTEXT_HEADER)?.to_str().ok()?;
        username_from_request_context(raw)
    }
}

/// Pull the username claim out of a serialized request context.
pub fn username_from_request_context(raw: &str) -> Option<String> {
    let context: Value = serde_json::from_str(raw).ok()?;

    USERNAME_CLAIM_POINTERS
        .iter()
        .filter_map(|pointer| context.pointer(pointer))
        .filter_map(Value::as_str)
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

/// Authenticated caller, available as a handler argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(pub String);

impl FromRequest for CallerIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let username = match req.app_data::<web::Data<dyn IdentityExtractor>>() {
            Some(extractor) => extractor.username(req),
            None => RequestContextIdentity.username(req),
        };

        ready(username.map(CallerIdentity).ok_or_else(|| {
            AppError::Unauthorized("caller identity missing from request context".to_string())
        }))
    }
}
