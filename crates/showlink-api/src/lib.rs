//! TMDB catalog client: wire types, the [`Transport`] seam and the typed
//! [`CatalogClient`].

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::CatalogClient;
pub use reqwest::Method;
pub use error::ApiError;
pub use transport::{
    ApiRequest, ApiResponse, ApiVersion, Credentials, HttpTransport, Transport,
    DEFAULT_BASE_URL, DEFAULT_LIST_BASE_URL,
};
pub use types::{MediaRef, MediaType, SeriesId};
