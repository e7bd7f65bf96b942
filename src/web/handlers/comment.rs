//! Comment handlers for the web API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::board::{BoardService, Pagination};
use crate::web::dto::{
    ApiPath, ApiQuery, CommentResponse, ContentRequest, JsonBody, PageQuery, Paginated,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::BoardMember;

/// GET /api/boards/:board_id/posts/:post_id/comments - Oldest first.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    member: BoardMember,
    ApiPath((_, post_id)): ApiPath<(i64, i64)>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Paginated<CommentResponse>, ApiError> {
    let result = BoardService::new(&state.db)
        .list_comments(member.board_id(), post_id, Pagination::page(query.page()))
        .await?;

    Ok(Paginated::from_result(result, CommentResponse::from))
}

/// POST /api/boards/:board_id/posts/:post_id/comments - Comment on a post.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    member: BoardMember,
    ApiPath((_, post_id)): ApiPath<(i64, i64)>,
    JsonBody(req): JsonBody<ContentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let comment = BoardService::new(&state.db)
        .create_comment(
            member.board_id(),
            post_id,
            member.user_id(),
            req.content.as_deref(),
        )
        .await?;

    Ok(Json(comment.into()))
}

/// PUT /api/boards/:board_id/posts/:post_id/comments/:comment_id
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    member: BoardMember,
    ApiPath((_, post_id, comment_id)): ApiPath<(i64, i64, i64)>,
    JsonBody(req): JsonBody<ContentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let comment = BoardService::new(&state.db)
        .update_comment(
            member.board_id(),
            post_id,
            comment_id,
            member.user_id(),
            req.content.as_deref(),
        )
        .await?;

    Ok(Json(comment.into()))
}

/// DELETE /api/boards/:board_id/posts/:post_id/comments/:comment_id
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    member: BoardMember,
    ApiPath((_, post_id, comment_id)): ApiPath<(i64, i64, i64)>,
) -> Result<StatusCode, ApiError> {
    BoardService::new(&state.db)
        .delete_comment(member.board_id(), post_id, comment_id, member.user_id())
        .await?;

    Ok(StatusCode::OK)
}
