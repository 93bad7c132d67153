//! HTTP client with response interception
//!
//! Every API call goes through [`HttpClient::request`], which:
//!
//! - serializes JSON bodies (multipart forms pass through untouched)
//! - attaches the stored access token as a bearer credential (browser context)
//! - parses the JSON body whatever the status
//! - classifies failures: 422 → [`ClientError::Entity`], 401 → logout/redirect,
//!   other non-2xx → [`ClientError::Http`]
//! - persists or clears credentials on the login, token and logout paths
//!
//! # Execution contexts
//!
//! | Context | 401 handling |
//! |---------|--------------|
//! | [`ExecutionContext::Browser`] | one coalesced logout call, clear storage, navigate to login |
//! | [`ExecutionContext::Server`] | [`ClientError::Redirect`] to login carrying the stale access token |

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::client::{normalize_path, paths};
use shared::{CredentialPair, EntityErrorPayload, Locale};

use crate::{ClientConfig, ClientError, ClientResult, CredentialStore, LogoutCoordinator, Navigator};

/// Request body
#[derive(Debug)]
pub enum RequestBody {
    /// Serialized to JSON, sent with `Content-Type: application/json`
    Json(Value),
    /// Sent as-is; the transport sets the multipart boundary header
    Multipart(reqwest::multipart::Form),
}

impl RequestBody {
    pub fn json<B: Serialize + ?Sized>(body: &B) -> ClientResult<Self> {
        Ok(Self::Json(serde_json::to_value(body)?))
    }
}

/// Per-request options
#[derive(Debug, Default)]
pub struct RequestOptions {
    /// Overrides the configured API base URL
    pub base_url: Option<String>,
    /// Merged over the base headers (these win)
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    /// Locale for server-context redirects (defaults to the configured one)
    pub locale: Option<Locale>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Explicit bearer credential (server context has no storage to read from)
    pub fn bearer(self, token: &str) -> ClientResult<Self> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ClientError::InvalidResponse(format!("Invalid token header: {}", e)))?;
        Ok(self.header(AUTHORIZATION, value))
    }

    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(RequestBody::json(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
    }
}

/// Successful response
#[derive(Debug, Clone)]
pub struct HttpResponse<T> {
    pub status: StatusCode,
    pub payload: T,
}

/// Browser-side session collaborators
pub struct BrowserContext {
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    logout: LogoutCoordinator,
    locale: RwLock<Locale>,
}

impl BrowserContext {
    fn persist_credentials(&self, path: &str, payload: &Value) {
        if paths::CREDENTIAL_PERSIST_PATHS.contains(&path) {
            match payload
                .get("data")
                .cloned()
                .map(serde_json::from_value::<CredentialPair>)
            {
                Some(Ok(pair)) => self.store.set_credentials(&pair),
                _ => tracing::warn!(path, "Login response carried no credential pair"),
            }
        } else if paths::CREDENTIAL_EXCHANGE_PATHS.contains(&path) {
            match serde_json::from_value::<CredentialPair>(payload.clone()) {
                Ok(pair) => self.store.set_credentials(&pair),
                Err(e) => tracing::warn!(path, error = %e, "Token response carried no credential pair"),
            }
        } else if paths::CREDENTIAL_CLEAR_PATHS.contains(&path) {
            self.store.remove_tokens();
        }
    }
}

/// Where the client runs
pub enum ExecutionContext {
    /// Interactive client with persistent storage and a navigator
    Browser(BrowserContext),
    /// Inside a server request handler; no storage
    Server,
}

struct Inner {
    client: Client,
    config: ClientConfig,
    context: ExecutionContext,
}

/// Intercepting HTTP client
///
/// Cheap to clone; clones share the transport, storage and logout coordinator.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<Inner>,
}

impl HttpClient {
    /// Client for an interactive session
    pub fn browser(
        config: ClientConfig,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let locale = RwLock::new(config.locale);
        Self::build(
            config,
            ExecutionContext::Browser(BrowserContext {
                store,
                navigator,
                logout: LogoutCoordinator::new(),
                locale,
            }),
        )
    }

    /// Client used from server request handlers
    pub fn server(config: ClientConfig) -> ClientResult<Self> {
        Self::build(config, ExecutionContext::Server)
    }

    fn build(config: ClientConfig, context: ExecutionContext) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            inner: Arc::new(Inner {
                client,
                config,
                context,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.inner.context
    }

    /// Credential storage (browser context only)
    pub fn credential_store(&self) -> Option<&Arc<dyn CredentialStore>> {
        match &self.inner.context {
            ExecutionContext::Browser(ctx) => Some(&ctx.store),
            ExecutionContext::Server => None,
        }
    }

    pub fn navigator(&self) -> Option<&Arc<dyn Navigator>> {
        match &self.inner.context {
            ExecutionContext::Browser(ctx) => Some(&ctx.navigator),
            ExecutionContext::Server => None,
        }
    }

    pub fn logout_coordinator(&self) -> Option<&LogoutCoordinator> {
        match &self.inner.context {
            ExecutionContext::Browser(ctx) => Some(&ctx.logout),
            ExecutionContext::Server => None,
        }
    }

    /// Current locale (browser locale follows [`HttpClient::set_locale`])
    pub fn locale(&self) -> Locale {
        match &self.inner.context {
            ExecutionContext::Browser(ctx) => *ctx.locale.read(),
            ExecutionContext::Server => self.inner.config.locale,
        }
    }

    pub fn set_locale(&self, locale: Locale) {
        if let ExecutionContext::Browser(ctx) = &self.inner.context {
            *ctx.locale.write() = locale;
        }
    }

    /// Edge server base URL
    pub fn app_url(&self) -> &str {
        &self.inner.config.app_url
    }

    // ========== Verbs ==========

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<HttpResponse<T>> {
        self.request(Method::GET, path, options).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ClientResult<HttpResponse<T>> {
        self.request(Method::POST, path, options.json(body)?).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ClientResult<HttpResponse<T>> {
        self.request(Method::PUT, path, options.json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<HttpResponse<T>> {
        self.request(Method::DELETE, path, options).await
    }

    /// Issue a request and intercept its response
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<HttpResponse<T>> {
        let path = normalize_path(path);
        let base_url = options
            .base_url
            .as_deref()
            .unwrap_or(&self.inner.config.api_url)
            .trim_end_matches('/');
        let url = format!("{}/{}", base_url, path);

        let mut headers = self.base_headers(options.body.as_ref());
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        // Needed after the body has been moved into the request
        let stale_token = options.bearer_token().map(str::to_string);
        let locale = options.locale.unwrap_or_else(|| self.locale());

        let mut builder = self.inner.client.request(method.clone(), &url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        builder = match options.body {
            Some(RequestBody::Json(body)) => builder.body(serde_json::to_vec(&body)?),
            Some(RequestBody::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        tracing::debug!(%method, %url, "Sending request");
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let payload: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        if !status.is_success() {
            tracing::debug!(%method, %url, %status, "Request failed");
            return Err(self
                .intercept_failure(status, payload, stale_token, locale)
                .await);
        }

        if let ExecutionContext::Browser(ctx) = &self.inner.context {
            ctx.persist_credentials(path, &payload);
        }

        Ok(HttpResponse {
            status,
            payload: serde_json::from_value(payload)?,
        })
    }

    fn base_headers(&self, body: Option<&RequestBody>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if !matches!(body, Some(RequestBody::Multipart(_))) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let ExecutionContext::Browser(ctx) = &self.inner.context
            && let Some(token) = ctx.store.access_token()
            && let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token))
        {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    async fn intercept_failure(
        &self,
        status: StatusCode,
        payload: Value,
        stale_token: Option<String>,
        locale: Locale,
    ) -> ClientError {
        match status {
            StatusCode::UNPROCESSABLE_ENTITY => {
                match serde_json::from_value::<EntityErrorPayload>(payload.clone()) {
                    Ok(payload) => ClientError::Entity { payload },
                    Err(_) => ClientError::Http { status, payload },
                }
            }
            StatusCode::UNAUTHORIZED => match &self.inner.context {
                ExecutionContext::Browser(ctx) => self.end_session(ctx).await,
                ExecutionContext::Server => {
                    let location = match stale_token {
                        Some(token) => format!("/{}/login?accessToken={}", locale, token),
                        None => format!("/{}/login", locale),
                    };
                    ClientError::Redirect { location }
                }
            },
            _ => ClientError::Http { status, payload },
        }
    }

    /// Coalesced logout: one server call however many requests saw the 401
    async fn end_session(&self, ctx: &BrowserContext) -> ClientError {
        let location = format!("/{}/login", *ctx.locale.read());

        let client = self.inner.client.clone();
        let url = format!(
            "{}/{}",
            self.inner.config.app_url.trim_end_matches('/'),
            paths::LOGOUT
        );
        let access_token = ctx.store.access_token();
        let store = ctx.store.clone();
        let navigator = ctx.navigator.clone();
        let target = location.clone();

        let started = ctx
            .logout
            .run_or_join(move || async move {
                let mut request = client.post(&url).header(CONTENT_TYPE, "application/json");
                if let Some(token) = access_token {
                    request = request.bearer_auth(token);
                }
                // Logout always counts as successful
                if let Err(e) = request.send().await {
                    tracing::warn!(error = %e, "Logout request failed; clearing session anyway");
                }
                store.remove_tokens();
                navigator.navigate(&target);
            })
            .await;

        if started {
            tracing::info!("Session ended after authentication failure");
        }
        ClientError::LoggedOut { location }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let context = match self.inner.context {
            ExecutionContext::Browser(_) => "browser",
            ExecutionContext::Server => "server",
        };
        f.debug_struct("HttpClient")
            .field("api_url", &self.inner.config.api_url)
            .field("app_url", &self.inner.config.app_url)
            .field("context", &context)
            .finish()
    }
}
