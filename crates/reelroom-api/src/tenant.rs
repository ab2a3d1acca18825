//! Tenant context resolution.
//!
//! The bearer token carried in the `Authorization` header is used verbatim
//! as the tenant identifier. This is not real authentication and should
//! only indicate where one would go: every row and object key downstream
//! is namespaced by this value, so the extractor is the logical
//! authorization boundary. A missing or empty header is a hard failure
//! rejected before any storage access.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::error::ApiError;

/// Extractor yielding the tenant identifier of the request.
#[derive(Debug, Clone)]
pub struct Tenant(pub String);

impl Tenant {
    pub fn id(&self) -> &str {
        &self.0
    }
}

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Tenant {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.strip_prefix("Bearer ").unwrap_or(v).trim())
            .filter(|v| !v.is_empty());

        match token {
            Some(token) => Ok(Tenant(token.to_string())),
            None => Err(ApiError::Unauthorized(
                "Unauthorized: Access denied".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<Tenant, ApiError> {
        let (mut parts, _) = request.into_parts();
        Tenant::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_header_value_is_the_tenant() {
        let request = Request::builder()
            .header("Authorization", "user-123")
            .body(())
            .unwrap();
        let tenant = extract(request).await.unwrap();
        assert_eq!(tenant.id(), "user-123");
    }

    #[tokio::test]
    async fn test_bearer_prefix_is_stripped() {
        let request = Request::builder()
            .header("Authorization", "Bearer user-123")
            .body(())
            .unwrap();
        let tenant = extract(request).await.unwrap();
        assert_eq!(tenant.id(), "user-123");
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let request = Request::builder().body(()).unwrap();
        assert!(matches!(
            extract(request).await,
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_header_is_unauthorized() {
        let request = Request::builder()
            .header("Authorization", "   ")
            .body(())
            .unwrap();
        assert!(matches!(
            extract(request).await,
            Err(ApiError::Unauthorized(_))
        ));
    }
}
