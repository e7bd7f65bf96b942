//! Post handlers for the web API.
//!
//! Any board member may read and create posts; only a post's author may
//! update or delete it.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::board::{BoardService, Pagination};
use crate::web::dto::{
    ApiPath, ApiQuery, ContentRequest, JsonBody, PageQuery, Paginated, PostResponse,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::BoardMember;

/// GET /api/boards/:board_id/posts - Newest posts first, 20 per page.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    member: BoardMember,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Paginated<PostResponse>, ApiError> {
    let result = BoardService::new(&state.db)
        .list_posts(member.board_id(), Pagination::page(query.page()))
        .await?;

    Ok(Paginated::from_result(result, PostResponse::from))
}

/// POST /api/boards/:board_id/posts - Create a post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    member: BoardMember,
    JsonBody(req): JsonBody<ContentRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = BoardService::new(&state.db)
        .create_post(member.board_id(), member.user_id(), req.content.as_deref())
        .await?;

    Ok(Json(post.into()))
}

/// GET /api/boards/:board_id/posts/:post_id - A single post.
pub async fn show_post(
    State(state): State<Arc<AppState>>,
    member: BoardMember,
    ApiPath((_, post_id)): ApiPath<(i64, i64)>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = BoardService::new(&state.db)
        .get_post(member.board_id(), post_id)
        .await?;

    Ok(Json(post.into()))
}

/// PUT /api/boards/:board_id/posts/:post_id - Edit one's own post.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    member: BoardMember,
    ApiPath((_, post_id)): ApiPath<(i64, i64)>,
    JsonBody(req): JsonBody<ContentRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = BoardService::new(&state.db)
        .update_post(
            member.board_id(),
            post_id,
            member.user_id(),
            req.content.as_deref(),
        )
        .await?;

    Ok(Json(post.into()))
}

/// DELETE /api/boards/:board_id/posts/:post_id - Delete one's own post.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    member: BoardMember,
    ApiPath((_, post_id)): ApiPath<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    BoardService::new(&state.db)
        .delete_post(member.board_id(), post_id, member.user_id())
        .await?;

    Ok(StatusCode::OK)
}
