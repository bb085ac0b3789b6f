//! Authenticated request wrapper for the awwdio API.
//!
//! Every request carries `Content-Type: application/json` and, when the
//! auth store holds a token, `Authorization: Bearer <token>`. Outcomes are
//! normalized into [`ApiResponse`]; nothing here returns `Err` or panics.

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::auth::AuthStore;
use crate::navigation::{Environment, LOGIN_PATH};

use super::transport::{HttpRequest, ReqwestTransport, Transport, TransportError};
use super::{ApiError, ApiResponse};

/// Per-request settings. `Default` is a GET with no extra headers.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Merged over the default `Content-Type` header
    pub headers: HeaderMap,
    pub body: Option<String>,
    /// Treat a 401 as an expired session (log out and go to the login
    /// route). Disable for endpoints where 401 means bad input.
    pub session_expiry_on_401: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
            session_expiry_on_401: true,
        }
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Options carrying `body` serialized as JSON.
    pub fn json<B: Serialize + ?Sized>(method: Method, body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Ok(Self {
            method,
            body: Some(body),
            ..Self::default()
        })
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn without_session_expiry(mut self) -> Self {
        self.session_expiry_on_401 = false;
        self
    }
}

/// API client bound to an auth store.
/// Clone is cheap when the transport is - clones share the store.
#[derive(Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    transport: T,
    store: AuthStore,
    environment: Environment,
    base_url: Option<String>,
}

impl ApiClient<ReqwestTransport> {
    /// Create a client using a default reqwest transport
    pub fn new(store: AuthStore, environment: Environment) -> Result<Self, TransportError> {
        Ok(Self::with_transport(ReqwestTransport::new()?, store, environment))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(transport: T, store: AuthStore, environment: Environment) -> Self {
        Self {
            transport,
            store,
            environment,
            base_url: None,
        }
    }

    /// Join URLs starting with `/` onto `base_url`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn store(&self) -> &AuthStore {
        &self.store
    }

    /// Resolve `url` against the base URL, if one is set.
    pub fn resolve(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if url.starts_with('/') => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url.to_string(),
        }
    }

    /// Perform one request and classify its outcome.
    ///
    /// The token is read from the store once, when the call starts.
    pub async fn fetch<R: DeserializeOwned>(&self, url: &str, options: RequestOptions) -> ApiResponse<R> {
        let url = self.resolve(url);
        let token = self.store.get_token();
        let session_expiry_on_401 = options.session_expiry_on_401;

        let request = match build_request(&url, options, token.as_deref()) {
            Ok(request) => request,
            Err(e) => return e.into(),
        };
        debug!(method = %request.method, url = %url, authenticated = token.is_some(), "Sending request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                let message = e.message();
                warn!(url = %url, error = %message, "Request failed without a response");
                return ApiError::network(message).into();
            }
        };

        if response.status == 401 && session_expiry_on_401 {
            self.handle_unauthorized();
            return ApiError::Unauthorized.into();
        }

        if !response.is_success() {
            debug!(
                url = %url,
                status = response.status,
                body = %ApiError::truncate_body(&response.body),
                "Request rejected"
            );
            return ApiError::from_status(response.status, &response.body).into();
        }

        // An empty 2xx body (e.g. 204) decodes as JSON null
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        match serde_json::from_str::<R>(body) {
            Ok(data) => ApiResponse::Data {
                data,
                status: response.status,
            },
            Err(e) => {
                warn!(url = %url, status = response.status, error = %e, "Failed to parse JSON response");
                ApiError::InvalidResponse(e.to_string()).into()
            }
        }
    }

    /// GET request with authentication
    pub async fn get<R: DeserializeOwned>(&self, url: &str) -> ApiResponse<R> {
        self.fetch(url, RequestOptions::new(Method::GET)).await
    }

    /// POST request with authentication and a JSON body
    pub async fn post<R, B>(&self, url: &str, body: &B) -> ApiResponse<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        match RequestOptions::json(Method::POST, body) {
            Ok(options) => self.fetch(url, options).await,
            Err(e) => e.into(),
        }
    }

    fn handle_unauthorized(&self) {
        match &self.environment {
            Environment::Interactive { navigator } => {
                self.store.expire_session();
                navigator.navigate(LOGIN_PATH);
            }
            Environment::Headless => {
                debug!("Received 401 in a headless context, leaving session untouched");
            }
        }
    }
}

fn build_request(url: &str, options: RequestOptions, token: Option<&str>) -> Result<HttpRequest, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.extend(options.headers);

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ApiError::InvalidRequest(format!("token is not a valid header value: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, value);
    }

    Ok(HttpRequest {
        method: options.method,
        url: url.to_string(),
        headers,
        body: options.body,
    })
}

// ============================================================================
// Tests
// ============================================================================
