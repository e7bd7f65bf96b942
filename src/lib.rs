//! Corkboard - shared boards with posts and threaded comments.
//!
//! Users own or share boards; members post to a board and comment on posts.
//! The server exposes everything as a JSON API and can serve the built
//! single-page client. The `client` module holds the client-side services.

pub mod auth;
pub mod board;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, hash_secret, register, validate_password, verify_password, PasswordError,
    RegistrationError, RegistrationRequest,
};
pub use board::{
    AccessError, Board, BoardAccess, BoardService, Comment, Membership, NewBoard, Pagination,
    PaginatedResult, Post, PAGE_SIZE,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{CorkboardError, FieldErrors, Result};
pub use web::WebServer;
