//! Authentication module for Corkboard.
//!
//! Password hashing, registration input validation and account registration.
//! Bearer tokens live in the web layer.

mod password;
mod registration;
pub mod validation;

pub use password::{
    hash_password, hash_secret, validate_password, verify_password, PasswordError,
    MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use registration::{register, RegistrationError, RegistrationRequest};
