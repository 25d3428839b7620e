//! Best-effort caller identity from the `x-user-id` header.
//!
//! The service sits behind a gateway that authenticates callers; here the
//! header is only attached to audit logs, never enforced.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use http::request::Parts;
use std::convert::Infallible;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the optional caller identity.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<String>);

impl MaybeUser {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(String::from);
        Ok(MaybeUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use http::Request;

    #[tokio::test]
    async fn extracts_user_header_when_present() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "ops-17")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let user = MaybeUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.as_deref(), Some("ops-17"));
    }

    #[tokio::test]
    async fn blank_header_reads_as_anonymous() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "   ")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let user = MaybeUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.as_deref(), None);
    }
}
