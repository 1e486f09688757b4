//! `Caller` extractor — resolves the subscribing principal.
//!
//! Authorization is performed upstream (auth proxy / session layer);
//! by the time a request reaches this service the resolved user id is
//! carried in the `X-Studyhub-User` header. Absent header means an
//! anonymous caller, which public feeds accept.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use studyhub_core::error::AppError;
use studyhub_core::types::Identity;

use crate::error::ApiError;

/// Header carrying the upstream-resolved user id.
pub const USER_HEADER: &str = "x-studyhub-user";

/// Extracted caller identity available in handlers.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Identity);

impl Caller {
    /// Returns the inner identity.
    pub fn identity(&self) -> Identity {
        self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(USER_HEADER).and_then(|v| v.to_str().ok()) else {
            return Ok(Caller(Identity::Anonymous));
        };

        let user_id = Uuid::parse_str(raw).map_err(|_| {
            ApiError::from(AppError::authentication(format!(
                "invalid {USER_HEADER} header value"
            )))
        })?;

        Ok(Caller(Identity::User(user_id)))
    }
}
