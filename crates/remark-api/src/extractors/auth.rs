//! Authentication extractor
//!
//! Resolves the bearer token in the Authorization header to the acting user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use remark_core::ActorContext;
use remark_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller
///
/// The role is read from the store on every request, so it reflects the
/// latest role change rather than the one current when the token was issued.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub actor: ActorContext,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let actor = AuthService::new(app_state.service_context())
            .authenticate(bearer.token())
            .await
            .map_err(|e| {
                if e.status_code() >= 500 {
                    return ApiError::from(e);
                }
                tracing::warn!(error = %e, "Rejected bearer token");
                ApiError::InvalidAuth
            })?;

        Ok(Self { actor })
    }
}
