//! Router configuration for the web API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::handlers::{
    create_board, create_comment, create_post, delete_board, delete_comment, delete_post,
    join_board, list_boards, list_comments, list_posts, login, me, register, share_board,
    show_board, show_post, update_board, update_comment, update_post, AppState,
};
use super::middleware::{
    create_cors_layer, jwt_auth, login_rate_limit, security_headers, JwtState, RateLimitState,
};

/// Create the main API router.
///
/// Every board-scoped route names its board parameter `board_id`.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    rate_limit_state: Arc<RateLimitState>,
    cors_origins: &[String],
) -> Router {
    // Only login is rate limited
    let login_route = Router::new().route("/login", post(login)).route_layer(
        middleware::from_fn(move |req, next| {
            let state = rate_limit_state.clone();
            login_rate_limit(state, req, next)
        }),
    );

    let auth_routes = Router::new().merge(login_route).route("/me", get(me));

    let board_routes = Router::new()
        .route("/", get(list_boards).post(create_board))
        .route(
            "/:board_id",
            get(show_board).put(update_board).delete(delete_board),
        )
        .route("/:board_id/members", post(share_board))
        .route("/:board_id/join", post(join_board))
        .route("/:board_id/posts", get(list_posts).post(create_post))
        .route(
            "/:board_id/posts/:post_id",
            get(show_post).put(update_post).delete(delete_post),
        )
        .route(
            "/:board_id/posts/:post_id/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/:board_id/posts/:post_id/comments/:comment_id",
            put(update_comment).delete(delete_comment),
        );

    // Unknown API paths answer with a JSON 404, never the static client.
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/boards", board_routes)
        .fallback(api_not_found);

    let jwt_state_for_middleware = jwt_state.clone();

    Router::new()
        .route("/user", post(register))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state_for_middleware.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

async fn api_not_found() -> ApiError {
    ApiError::not_found("No such endpoint")
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Serve the built single-page client from `static_path`.
///
/// Unknown paths fall back to `index.html` so client-side routes resolve.
/// Returns None if the directory has no `index.html`.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    let root = Path::new(static_path);
    let index = root.join("index.html");
    if !index.is_file() {
        tracing::warn!("Static client not found at {}; not serving it", static_path);
        return None;
    }

    let serve = ServeDir::new(root).fallback(ServeFile::new(index));
    Some(Router::new().fallback_service(serve))
}
