//! HTTP wrapper used by the client services.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::error::{ClientError, ClientResult};
use super::session::SessionStore;

/// Total request timeout in seconds.
const TIMEOUT_SECS: u64 = 30;

/// User agent string for API calls.
const USER_AGENT: &str = concat!("corkboard-client/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOutcome {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl HttpOutcome {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Turn a non-success outcome into an error.
    pub fn error_for_status(self) -> ClientResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// HTTP client bound to a base URL that forwards the stored session token.
#[derive(Clone)]
pub struct HttpService {
    client: Client,
    base_url: Url,
    session: Arc<dyn SessionStore>,
}

impl HttpService {
    /// Create a service for the API at `base_url`.
    pub fn new(base_url: &str, session: Arc<dyn SessionStore>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            session,
        })
    }

    /// The session store this service reads tokens from.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.base_url.join(path)?;
        let mut builder = self.client.request(method, url);
        if let Some(token) = self.session.token()? {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send(builder: RequestBuilder) -> ClientResult<HttpOutcome> {
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!("HTTP response {}", status);
        Ok(HttpOutcome { status, body })
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str) -> ClientResult<HttpOutcome> {
        Self::send(self.request(Method::GET, path)?).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<HttpOutcome> {
        Self::send(self.request(Method::POST, path)?.json(body)).await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<HttpOutcome> {
        Self::send(self.request(Method::PUT, path)?.json(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> ClientResult<HttpOutcome> {
        Self::send(self.request(Method::DELETE, path)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemorySessionStore;

    #[test]
    fn test_outcome_success_range() {
        let ok = HttpOutcome {
            status: 201,
            body: "{}".to_string(),
        };
        assert!(ok.is_success());
        assert!(ok.error_for_status().is_ok());

        let err = HttpOutcome {
            status: 422,
            body: "bad".to_string(),
        };
        assert!(!err.is_success());
        assert!(matches!(
            err.error_for_status(),
            Err(ClientError::Status { status: 422, .. })
        ));
    }

    #[test]
    fn test_outcome_json() {
        let outcome = HttpOutcome {
            status: 200,
            body: r#"{"id": 3}"#.to_string(),
        };
        let value: serde_json::Value = outcome.json().unwrap();
        assert_eq!(value["id"], 3);
    }

    #[test]
    fn test_invalid_base_url() {
        let store = Arc::new(MemorySessionStore::new());
        assert!(matches!(
            HttpService::new("not a url", store),
            Err(ClientError::Url(_))
        ));
    }
}
