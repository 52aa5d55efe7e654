//! Session-bearing HTTP connection.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use mall_common::{ErrorBody, HarnessConfig, SessionToken};

use crate::error::ClientError;

/// One logical connection to the backend.
///
/// Holds the base URL, the underlying HTTP client, and the active
/// session. Only one actor is active per connection at a time; adopting
/// a new session fully replaces the previous one.
#[derive(Debug, Clone)]
pub struct Connection {
    base_url: String,
    http: reqwest::Client,
    session: Option<SessionToken>,
}

impl Connection {
    /// Connect to a base URL with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Connect with an explicit per-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim_end_matches('/');
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: trimmed.to_string(),
            http,
            session: None,
        })
    }

    /// Connect using harness configuration.
    pub fn from_config(config: &HarnessConfig) -> Result<Self, ClientError> {
        Self::with_timeout(config.base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The active session token, if any.
    pub fn session(&self) -> Option<&SessionToken> {
        self.session.as_ref()
    }

    /// Replace the active session. Last login wins; there is no stacking.
    pub fn adopt_session(&mut self, token: SessionToken) {
        self.session = Some(token);
    }

    /// Drop the active session, returning the connection to the
    /// unauthenticated state.
    pub fn clear_session(&mut self) {
        self.session = None;
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::GET, path, None::<&()>, None::<&()>)
            .await
    }

    pub(crate) async fn get_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        self.request(Method::GET, path, None::<&()>, Some(query))
            .await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.request(Method::POST, path, Some(body), None::<&()>)
            .await
    }

    /// DELETE expecting an empty success response.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.build(Method::DELETE, path, None::<&()>, None::<&()>).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(self.reject("DELETE", path, status, response).await)
    }

    async fn request<B: Serialize, Q: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: Option<&Q>,
    ) -> Result<T, ClientError> {
        let method_label: &'static str = if method == Method::GET {
            "GET"
        } else if method == Method::POST {
            "POST"
        } else {
            "REQUEST"
        };
        let response = self.build(method, path, body, query).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.reject(method_label, path, status, response).await);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
            path: path.to_string(),
            source,
        })
    }

    fn build<B: Serialize, Q: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: Option<&Q>,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.session {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        builder
    }

    /// Turn a non-2xx response into an API error, decoding the error
    /// envelope when the backend sent one.
    async fn reject(
        &self,
        method: &'static str,
        path: &str,
        status: StatusCode,
        response: reqwest::Response,
    ) -> ClientError {
        let body = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes).ok(),
            Err(_) => None,
        };
        let body = body.unwrap_or_else(|| ErrorBody::new("unknown", "no error envelope in response"));

        tracing::debug!(
            method,
            path,
            status = status.as_u16(),
            code = %body.code,
            "request rejected"
        );

        ClientError::Api {
            method,
            path: path.to_string(),
            status: status.as_u16(),
            code: body.code,
            message: body.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_base_urls() {
        assert!(matches!(
            Connection::new("ftp://mall.test"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn trims_trailing_slash() {
        let conn = Connection::new("http://mall.test/").unwrap();
        assert_eq!(conn.base_url(), "http://mall.test");
    }

    #[test]
    fn adopt_session_replaces_prior_token() {
        let mut conn = Connection::new("http://mall.test").unwrap();
        conn.adopt_session(SessionToken("first".into()));
        conn.adopt_session(SessionToken("second".into()));
        assert_eq!(conn.session().unwrap().as_str(), "second");

        conn.clear_session();
        assert!(conn.session().is_none());
    }
}
