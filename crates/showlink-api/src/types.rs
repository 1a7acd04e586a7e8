use serde::{Deserialize, Serialize};

/// Catalog identifier of a television series.
pub type SeriesId = u64;

/// The only media kind this client mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Tv,
}

/// Addresses one item in a mutation payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub media_type: MediaType,
    pub media_id: SeriesId,
}

impl MediaRef {
    pub fn tv(media_id: SeriesId) -> Self {
        Self {
            media_type: MediaType::Tv,
            media_id,
        }
    }
}

// ── Request bodies ───────────────────────────────────────────────

/// Body of `POST /account/{id}/favorite`.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteBody {
    #[serde(flatten)]
    pub media: MediaRef,
    pub favorite: bool,
}

/// Body of `POST /list/{id}/items`.
#[derive(Debug, Clone, Serialize)]
pub struct ListItemsBody {
    pub items: Vec<MediaRef>,
}

// ── Response bodies ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: SeriesId,
    pub name: Option<String>,
    pub first_air_date: Option<String>,
}

/// Single-item acknowledgement, as returned by the favorites endpoint.
#[derive(Debug, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub success: bool,
    pub status_message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<Vec<String>>,
}

impl AckResponse {
    /// Error messages under either key the service uses, `errors` first.
    pub fn error_messages(&self) -> Option<&[String]> {
        self.errors.as_deref().or(self.error.as_deref())
    }
}

/// Per-item results of a batch list mutation.
#[derive(Debug, Deserialize)]
pub struct ListItemsResponse {
    pub success: Option<bool>,
    pub status_message: Option<String>,
    #[serde(default)]
    pub results: Vec<ListItemResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListItemResult {
    pub media_id: SeriesId,
    pub media_type: Option<String>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<Vec<String>>,
}
