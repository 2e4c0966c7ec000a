//! Comment handlers

use axum::{extract::State, Json};
use remark_service::dto::{
    CommentDetailResponse, CommentResponse, CreateCommentRequest, MessageResponse,
    UpdateCommentStatusRequest,
};
use remark_service::CommentService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Post a comment
///
/// POST /comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comment = service.create_comment(&auth.actor, &request.content).await?;
    Ok(Created(Json(comment)))
}

/// Get a comment with author and reactions
///
/// GET /comments/:id
pub async fn get_comment(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<CommentDetailResponse>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.get_comment(comment_id).await?))
}

/// Change a comment's status
///
/// PATCH /comments/:id
pub async fn update_comment_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateCommentStatusRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let comment = service.set_status(&auth.actor, comment_id, request).await?;
    Ok(Json(comment))
}

/// Delete a comment and its reactions
///
/// DELETE /comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.delete_comment(&auth.actor, comment_id).await?))
}
