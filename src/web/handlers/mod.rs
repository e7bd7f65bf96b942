//! API handlers.

pub mod auth;
pub mod board;
pub mod comment;
pub mod post;

pub use auth::*;
pub use board::*;
pub use comment::*;
pub use post::*;
