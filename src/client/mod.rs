//! Client services for Corkboard.
//!
//! A Rust rendition of the single-page client's service layer: an HTTP
//! wrapper that attaches the stored token, session storage, account
//! registration with error normalization, login/logout and the route guard.

mod account;
mod error;
mod guard;
mod http;
mod registration;
mod session;

pub use account::{Account, AccountErrors};
pub use error::{ClientError, ClientResult};
pub use guard::{GuardDecision, RouteGuard, LOGIN_ROUTE};
pub use http::{HttpOutcome, HttpService};
pub use registration::{RegistrationService, SessionService};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, AUTH_TOKEN_KEY};
