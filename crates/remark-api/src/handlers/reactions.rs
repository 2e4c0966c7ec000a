//! Reaction handlers
//!
//! Like/dislike toggling on comments.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use remark_core::ToggleOutcome;
use remark_service::dto::{MessageResponse, ReactionRequest, ReactionWithAuthorResponse};
use remark_service::ReactionService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Toggle the caller's reaction
///
/// POST /comments/:id/likes
///
/// 201 when a reaction was created, 200 when it was flipped or removed.
pub async fn set_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
    ValidatedJson(request): ValidatedJson<ReactionRequest>,
) -> ApiResult<Response> {
    let service = ReactionService::new(state.service_context());
    let result = service
        .set_reaction(&auth.actor, comment_id, request.kind.as_deref())
        .await?;

    let status = match result.outcome {
        ToggleOutcome::Created => StatusCode::CREATED,
        ToggleOutcome::Updated | ToggleOutcome::Removed => StatusCode::OK,
    };
    Ok((status, Json(result)).into_response())
}

/// List reactions on a comment
///
/// GET /comments/:id/likes
pub async fn list_reactions(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<Vec<ReactionWithAuthorResponse>>> {
    let service = ReactionService::new(state.service_context());
    Ok(Json(service.list_reactions(comment_id).await?))
}

/// Remove the caller's reaction of the given type
///
/// DELETE /comments/:id/likes
pub async fn remove_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
    ValidatedJson(request): ValidatedJson<ReactionRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = ReactionService::new(state.service_context());
    let response = service
        .remove_reaction(&auth.actor, comment_id, request.kind.as_deref())
        .await?;
    Ok(Json(response))
}
