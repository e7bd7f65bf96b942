//! Board handlers for the web API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::board::{AccessError, BoardService, BoardUpdate, NewBoard};
use crate::web::dto::{
    ApiPath, BoardRequest, JoinBoardRequest, JsonBody, MembershipResponse, ShareBoardRequest,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{AuthUser, BoardAdmin, BoardMember};

fn created_or_ok(created: bool) -> StatusCode {
    if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

/// GET /api/boards - Boards the caller is a member of.
pub async fn list_boards(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<MembershipResponse>>, ApiError> {
    let boards = BoardService::new(&state.db).list_boards(auth.id()).await?;
    Ok(Json(boards.into_iter().map(Into::into).collect()))
}

/// POST /api/boards - Create a board owned by the caller.
pub async fn create_board(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    JsonBody(req): JsonBody<BoardRequest>,
) -> Result<(StatusCode, Json<MembershipResponse>), ApiError> {
    let new_board = NewBoard {
        name: req.board_name().map(str::to_string),
        password: req.encrypted_password,
    };
    let access = BoardService::new(&state.db)
        .create_board(auth.id(), new_board)
        .await?;

    Ok((StatusCode::CREATED, Json(access.into())))
}

/// GET /api/boards/:board_id - The caller's membership of a board.
pub async fn show_board(member: BoardMember) -> Json<MembershipResponse> {
    Json(member.access.into())
}

/// PUT /api/boards/:board_id - Rename a board and/or change its secret.
pub async fn update_board(
    State(state): State<Arc<AppState>>,
    BoardAdmin(admin): BoardAdmin,
    JsonBody(req): JsonBody<BoardRequest>,
) -> Result<Json<MembershipResponse>, ApiError> {
    let update = BoardUpdate {
        name: req.board_name().map(str::to_string),
        password: req.encrypted_password,
    };
    let access = BoardService::new(&state.db)
        .update_board(&admin.access, update)
        .await?;

    Ok(Json(access.into()))
}

/// DELETE /api/boards/:board_id - Delete a board and its content.
pub async fn delete_board(
    State(state): State<Arc<AppState>>,
    BoardAdmin(admin): BoardAdmin,
) -> Result<StatusCode, ApiError> {
    BoardService::new(&state.db)
        .delete_board(admin.board_id())
        .await?;
    Ok(StatusCode::OK)
}

/// POST /api/boards/:board_id/members - Share a board with a user by email.
pub async fn share_board(
    State(state): State<Arc<AppState>>,
    BoardAdmin(admin): BoardAdmin,
    ValidatedJson(req): ValidatedJson<ShareBoardRequest>,
) -> Result<(StatusCode, Json<MembershipResponse>), ApiError> {
    let (access, created) = BoardService::new(&state.db)
        .share_board(admin.board_id(), &req.email)
        .await?;

    Ok((created_or_ok(created), Json(access.into())))
}

/// POST /api/boards/:board_id/join - Join a board with its shared secret.
pub async fn join_board(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    board_id: Result<ApiPath<i64>, ApiError>,
    ValidatedJson(req): ValidatedJson<JoinBoardRequest>,
) -> Result<(StatusCode, Json<MembershipResponse>), ApiError> {
    // An unparseable id is reported exactly like a missing board.
    let ApiPath(board_id) = board_id.map_err(|_| AccessError::NotFound)?;
    let (access, created) = BoardService::new(&state.db)
        .join_board(board_id, auth.id(), &req.encrypted_password)
        .await?;

    Ok((created_or_ok(created), Json(access.into())))
}
