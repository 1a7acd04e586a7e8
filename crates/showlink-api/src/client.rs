use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, ApiVersion, Transport};
use crate::types::SearchResponse;

/// Typed catalog calls on top of a [`Transport`].
pub struct CatalogClient<T> {
    transport: T,
}

impl<T: Transport> CatalogClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Turn a non-2xx response into [`ApiError::Api`] carrying the body.
    fn check_response(resp: ApiResponse) -> Result<ApiResponse, ApiError> {
        if resp.is_success() {
            Ok(resp)
        } else {
            Err(ApiError::Api {
                status: resp.status,
                message: resp.body,
            })
        }
    }

    fn parse<R: DeserializeOwned>(resp: &ApiResponse) -> Result<R, ApiError> {
        serde_json::from_str(&resp.body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Send a prepared request and return the raw response, whatever its status.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.transport.send(request).await
    }

    /// Search TV series by title. Results are in the catalog's relevance order.
    pub async fn search_tv(&self, query: &str) -> Result<SearchResponse, ApiError> {
        let request = ApiRequest::get(ApiVersion::V3, "/search/tv").query("query", query);
        let resp = Self::check_response(self.transport.send(request).await?)?;
        Self::parse(&resp)
    }

    /// The account's favorite TV series, passed through untouched.
    pub async fn favorite_tv(
        &self,
        account_id: &str,
        session_id: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let request = ApiRequest::get(ApiVersion::V3, format!("/account/{account_id}/favorite/tv"))
            .query("session_id", session_id);
        let resp = Self::check_response(self.transport.send(request).await?)?;
        Self::parse(&resp)
    }

    /// This week's trending TV series.
    ///
    /// A body without a `results` array yields an empty list.
    pub async fn trending_tv_week(&self) -> Result<Vec<serde_json::Value>, ApiError> {
        let request = ApiRequest::get(ApiVersion::V3, "/trending/tv/week");
        let resp = Self::check_response(self.transport.send(request).await?)?;
        let mut body: serde_json::Value = Self::parse(&resp)?;

        match body.get_mut("results").map(serde_json::Value::take) {
            Some(serde_json::Value::Array(items)) => Ok(items),
            _ => {
                tracing::warn!("trending response has no results");
                Ok(Vec::new())
            }
        }
    }
}
