//! Account registration and login services.

use serde::Serialize;
use serde_json::Value;

use super::account::{Account, AccountErrors};
use super::error::{ClientError, ClientResult};
use super::http::{HttpOutcome, HttpService};

/// Registration endpoint.
const REGISTER_PATH: &str = "/user";

/// Login endpoint.
const LOGIN_PATH: &str = "/api/auth/login";

fn store_token(http: &HttpService, outcome: &HttpOutcome) -> ClientResult<Value> {
    let data: Value = outcome.json()?;
    match data.get("access_token").and_then(Value::as_str) {
        Some(token) => http.session().store(token)?,
        None => tracing::warn!("Auth response did not contain an access token"),
    }
    Ok(data)
}

/// Creates accounts through `POST /user`.
pub struct RegistrationService {
    http: HttpService,
}

impl RegistrationService {
    pub fn new(http: HttpService) -> Self {
        Self { http }
    }

    /// Register an account.
    ///
    /// On success the returned token is stored and the parsed response is
    /// yielded. A rejected registration yields [`ClientError::Account`] with
    /// normalized per-field errors.
    pub async fn register_account(&self, account: &Account) -> ClientResult<Value> {
        let outcome = self.http.post(REGISTER_PATH, account).await?;
        if !outcome.is_success() {
            tracing::debug!("Registration rejected with status {}", outcome.status);
            return Err(ClientError::Account(AccountErrors::from_body(&outcome.body)));
        }
        store_token(&self.http, &outcome)
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Logs in and out of the API.
pub struct SessionService {
    http: HttpService,
}

impl SessionService {
    pub fn new(http: HttpService) -> Self {
        Self { http }
    }

    /// Log in and store the access token.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Value> {
        let outcome = self
            .http
            .post(LOGIN_PATH, &Credentials { email, password })
            .await?;
        if !outcome.is_success() {
            return Err(ClientError::Account(AccountErrors::from_body(&outcome.body)));
        }
        store_token(&self.http, &outcome)
    }

    /// Forget the stored token.
    pub fn logout(&self) -> ClientResult<()> {
        self.http.session().clear()
    }

    /// Whether a token is stored.
    pub fn is_logged_in(&self) -> ClientResult<bool> {
        self.http.session().has_token()
    }
}
