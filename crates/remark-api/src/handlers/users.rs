//! User handlers
//!
//! Listing and lookup for any authenticated caller; create, role change and
//! delete for admins.

use axum::{extract::State, Json};
use remark_service::dto::{
    CreateUserRequest, MessageResponse, UpdateUserRequest, UserMutationResponse, UserResponse,
    UserSummaryResponse,
};
use remark_service::UserService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List users
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<UserSummaryResponse>>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.list_users().await?))
}

/// Get user by ID
///
/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_user(user_id).await?))
}

/// Create a user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<UserMutationResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.create_user(&auth.actor, request).await?;
    Ok(Created(Json(response)))
}

/// Change a user's role
///
/// PATCH /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserMutationResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_user(&auth.actor, user_id, request).await?;
    Ok(Json(response))
}

/// Delete a user and everything they authored
///
/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.delete_user(&auth.actor, user_id).await?))
}
