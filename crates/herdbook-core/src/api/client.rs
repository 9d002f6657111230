//! Authenticated HTTP client for the farm-management API.
//!
//! `ApiClient` wraps a `reqwest::Client` and an injected session store.
//! Before each send it attaches the current access token as a bearer
//! credential; when the server answers 401 on a request's first attempt,
//! it exchanges the refresh token for a new access token and replays the
//! request exactly once. A failed refresh clears the session (logout) and
//! is terminal for that request chain.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::SessionStore;

use super::ApiError;

/// Outbound request descriptor, rebuilt per attempt so a replay carries
/// the refreshed token.
pub(crate) struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Value>,
}

impl ApiRequest {
    pub(crate) fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub(crate) fn with_body<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// API client for the farm-management service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
    /// Serializes token refreshes so concurrent 401s trigger one refresh
    /// call; waiters reuse the token the first caller obtained.
    refresh_gate: Arc<Mutex<()>>,
}

impl ApiClient {
    /// Create a new API client against `base_url` (must end with a slash),
    /// reading and mutating tokens through the given session store.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            session,
            refresh_gate: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn build(&self, request: &ApiRequest, token: Option<&str>) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        builder
    }

    /// Send a request, replaying it at most once after a token refresh.
    ///
    /// The replay decision is a pure function of the attempt count: only a
    /// 401 on attempt 0 enters the refresh path. Transport errors and
    /// non-401 statuses propagate immediately with no retry.
    async fn dispatch(&self, request: ApiRequest) -> Result<Response, ApiError> {
        let mut token = self.session.tokens().access;
        let mut attempt: u8 = 0;

        loop {
            debug!(method = %request.method, path = %request.path, attempt, "sending request");
            let response = self.build(&request, token.as_deref()).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::UNAUTHORIZED && attempt == 0 {
                debug!(path = %request.path, "access token rejected, refreshing");
                attempt = 1;
                token = Some(self.refresh_access_token(token.as_deref()).await?);
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// `stale` is the access token the failing request was sent with.
    /// Refreshes are single-flight: the gate serializes callers, and a
    /// waiter that finds the stored token already changed from its stale
    /// one reuses it instead of refreshing again.
    ///
    /// Any unrecoverable outcome clears the session store (logout): a
    /// missing refresh token yields `Unauthorized` without calling the
    /// refresh endpoint; a failed refresh call yields `SessionExpired`.
    async fn refresh_access_token(&self, stale: Option<&str>) -> Result<String, ApiError> {
        let _guard = self.refresh_gate.lock().await;

        let tokens = self.session.tokens();
        if let Some(current) = tokens.access {
            if Some(current.as_str()) != stale {
                debug!("access token already refreshed by a concurrent request");
                return Ok(current);
            }
        }

        let Some(refresh) = tokens.refresh else {
            warn!("no refresh token available, logging out");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        };

        // Dedicated unauthenticated call; never routed through dispatch.
        let url = format!("{}auth/refresh/", self.base_url);
        let result = self
            .client
            .post(&url)
            .json(&RefreshRequest { refresh: &refresh })
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                match response.json::<RefreshResponse>().await {
                    Ok(refreshed) => {
                        debug!("access token refreshed");
                        self.session.set_access_token(refreshed.access.clone());
                        Ok(refreshed.access)
                    }
                    Err(err) => {
                        warn!(error = %err, "refresh response unreadable, logging out");
                        self.session.clear();
                        Err(ApiError::SessionExpired(format!(
                            "refresh response missing access token: {err}"
                        )))
                    }
                }
            }
            Ok(response) => {
                let status = response.status();
                warn!(%status, "token refresh rejected, logging out");
                self.session.clear();
                Err(ApiError::SessionExpired(format!(
                    "refresh rejected with status {status}"
                )))
            }
            Err(err) => {
                warn!(error = %err, "token refresh call failed, logging out");
                self.session.clear();
                Err(ApiError::SessionExpired(format!(
                    "refresh request failed: {err}"
                )))
            }
        }
    }

    async fn parse_json<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
        response.json().await.map_err(|err| {
            ApiError::InvalidResponse(format!("failed to decode response from {path}: {err}"))
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError> {
        let response = self
            .dispatch(ApiRequest::new(Method::GET, path).with_query(query))
            .await?;
        Self::parse_json(response, path).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .dispatch(ApiRequest::new(Method::POST, path).with_body(body)?)
            .await?;
        Self::parse_json(response, path).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .dispatch(ApiRequest::new(Method::PATCH, path).with_body(body)?)
            .await?;
        Self::parse_json(response, path).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        // DRF answers DELETE with 204 and an empty body
        self.dispatch(ApiRequest::new(Method::DELETE, path)).await?;
        Ok(())
    }
}
