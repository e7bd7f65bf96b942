//! Web API module for Corkboard.
//!
//! This module provides the REST API (boards, posts, comments, accounts) and
//! optionally serves the built single-page client.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use middleware::{JwtState, RateLimitState};
pub use router::create_router;
pub use server::WebServer;
