use serde::{Deserialize, Serialize};

pub use showlink_api::{MediaRef, MediaType, SeriesId};

/// Where a batch of series is being added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationTarget {
    /// The account's favorites. The endpoint takes one item per call.
    Favorites {
        account_id: String,
        session_id: String,
    },
    /// A user-owned list. The endpoint takes an array of items.
    CustomList { list_id: String, session_id: String },
}

impl MutationTarget {
    pub fn mode(&self) -> MutationMode {
        match self {
            Self::Favorites { .. } => MutationMode::PerItem,
            Self::CustomList { .. } => MutationMode::Batch,
        }
    }
}

/// Response topology of a mutation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMode {
    /// One item per call, answered with a single acknowledgement.
    PerItem,
    /// Many items per call, answered with a `results` array.
    Batch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    /// The series was already present in the target collection.
    Duplicate,
    Failure,
    /// The service answered the batch but said nothing about this id.
    Unreported,
}

/// Outcome for one requested series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub media_id: SeriesId,
    pub status: OutcomeStatus,
    pub detail: String,
}

impl ItemOutcome {
    pub fn success(media_id: SeriesId) -> Self {
        Self {
            media_id,
            status: OutcomeStatus::Success,
            detail: String::new(),
        }
    }

    pub fn duplicate(media_id: SeriesId, detail: impl Into<String>) -> Self {
        Self {
            media_id,
            status: OutcomeStatus::Duplicate,
            detail: detail.into(),
        }
    }

    pub fn failure(media_id: SeriesId, detail: impl Into<String>) -> Self {
        Self {
            media_id,
            status: OutcomeStatus::Failure,
            detail: detail.into(),
        }
    }

    pub fn unreported(media_id: SeriesId) -> Self {
        Self {
            media_id,
            status: OutcomeStatus::Unreported,
            detail: String::new(),
        }
    }
}

/// Outcomes in the order the ids were requested, one per id.
pub type BatchResult = Vec<ItemOutcome>;

/// What a single title search produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    Resolved(SeriesId),
    /// The catalog returned no results.
    Unresolved,
    /// The search call itself failed.
    Failed(String),
}

/// Resolution of one input title, kept at the input's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleResolution {
    pub title: String,
    pub normalized: String,
    pub resolution: Resolution,
}

impl TitleResolution {
    pub fn id(&self) -> Option<SeriesId> {
        match self.resolution {
            Resolution::Resolved(id) => Some(id),
            _ => None,
        }
    }
}
