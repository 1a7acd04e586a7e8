//! Request/response contract with the catalog service.
//!
//! [`Transport`] is the seam between the typed client and the network.
//! [`HttpTransport`] is the reqwest-backed implementation; tests substitute
//! an in-memory one.

use std::future::Future;

use reqwest::{Client, Method};
use serde::Serialize;
use url::Url;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LIST_BASE_URL: &str = "https://api.themoviedb.org/4";

/// Which catalog API generation a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V3,
    V4,
}

/// A catalog request before credentials and base URL are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub version: ApiVersion,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(version: ApiVersion, path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            version,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(version: ApiVersion, path: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            ..Self::get(version, path)
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed call. Non-2xx statuses are not errors
/// at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends catalog requests.
///
/// Returns `Err` only when no response was obtained at all.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;
}

/// Credentials and endpoints for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub access_token: Option<String>,
}

/// reqwest-backed [`Transport`].
///
/// Every request carries the `api_key` query parameter, plus a bearer token
/// when one is configured.
pub struct HttpTransport {
    credentials: Credentials,
    base_url: Url,
    list_base_url: Url,
    http: Client,
}

impl HttpTransport {
    pub fn new(
        credentials: Credentials,
        base_url: &str,
        list_base_url: &str,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            credentials,
            base_url: Url::parse(base_url)?,
            list_base_url: Url::parse(list_base_url)?,
            http: Client::new(),
        })
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let base = match request.version {
            ApiVersion::V3 => &self.base_url,
            ApiVersion::V4 => &self.list_base_url,
        };
        let joined = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request)?;
        tracing::debug!(method = %request.method, path = %request.path, "catalog request");

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .query(&[("api_key", self.credentials.api_key.as_str())])
            .query(&request.query);

        if let Some(token) = &self.credentials.access_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        if !(200..300).contains(&status) {
            tracing::warn!(status, path = %request.path, "catalog API error");
        }
        Ok(ApiResponse { status, body })
    }
}
