use crate::domain::message::MissingRequiredFields;
use crate::error::AppError;
use axum::{
    Json,
    extract::{FromRequest, Request, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// JSON body extractor whose rejections use the service's `{error}` shape.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => Err(AppError::PayloadTooLarge),
            // A body that is not declared as JSON carries no fields at all.
            Err(JsonRejection::MissingJsonContentType(_)) => Err(MissingRequiredFields.into()),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

/// Origins allowed to call the API from a browser.
#[derive(Clone, Debug)]
pub struct OriginPolicy {
    allowed: Arc<[HeaderValue]>,
}

impl OriginPolicy {
    #[must_use]
    pub fn new(allowed: Vec<HeaderValue>) -> Self {
        Self { allowed: allowed.into() }
    }

    /// Requests without an `Origin` header are not browser cross-origin calls and always pass.
    #[must_use]
    pub fn allows(&self, origin: Option<&HeaderValue>) -> bool {
        origin.is_none_or(|o| self.allowed.contains(o))
    }
}

/// Refuses requests whose `Origin` is not on the allow-list, before any handler or CORS processing.
///
/// # Errors
/// Returns `AppError::OriginNotAllowed` for an unlisted origin.
pub async fn enforce_origin(
    State(policy): State<OriginPolicy>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let origin = request.headers().get(header::ORIGIN);
    if !policy.allows(origin) {
        tracing::debug!(origin = ?origin, "Origin not on allow-list");
        return Err(AppError::OriginNotAllowed);
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> OriginPolicy {
        OriginPolicy::new(vec![HeaderValue::from_static("http://localhost:5173")])
    }

    #[test]
    fn test_missing_origin_allowed() {
        assert!(policy().allows(None));
    }

    #[test]
    fn test_listed_origin_allowed() {
        assert!(policy().allows(Some(&HeaderValue::from_static("http://localhost:5173"))));
    }

    #[test]
    fn test_unlisted_origin_refused() {
        assert!(!policy().allows(Some(&HeaderValue::from_static("http://evil.example"))));
        assert!(!policy().allows(Some(&HeaderValue::from_static("http://localhost:5174"))));
    }
}
