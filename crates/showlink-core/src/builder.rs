use showlink_api::types::{FavoriteBody, ListItemsBody};
use showlink_api::{ApiError, ApiRequest, ApiVersion, MediaRef, SeriesId};

use crate::models::{MutationMode, MutationTarget};

/// A prepared mutation call and the ids its response must account for.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub request: ApiRequest,
    pub requested: Vec<SeriesId>,
    pub mode: MutationMode,
}

/// Build the calls that add `ids` to `target`.
///
/// Favorites get one request per id; a custom list gets a single request
/// carrying every id. Ids are neither deduplicated nor reordered. An empty
/// id list builds nothing.
pub fn build(ids: &[SeriesId], target: &MutationTarget) -> Result<Vec<OutboundRequest>, ApiError> {
    match target {
        MutationTarget::Favorites {
            account_id,
            session_id,
        } => ids
            .iter()
            .map(|&id| -> Result<OutboundRequest, ApiError> {
                let body = FavoriteBody {
                    media: MediaRef::tv(id),
                    favorite: true,
                };
                let request =
                    ApiRequest::post(ApiVersion::V3, format!("/account/{account_id}/favorite"))
                        .query("session_id", session_id.as_str())
                        .json(&body)?;
                Ok(OutboundRequest {
                    request,
                    requested: vec![id],
                    mode: MutationMode::PerItem,
                })
            })
            .collect(),

        MutationTarget::CustomList {
            list_id,
            session_id,
        } => {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            let body = ListItemsBody {
                items: ids.iter().map(|&id| MediaRef::tv(id)).collect(),
            };
            let request = ApiRequest::post(ApiVersion::V4, format!("/list/{list_id}/items"))
                .query("session_id", session_id.as_str())
                .json(&body)?;
            Ok(vec![OutboundRequest {
                request,
                requested: ids.to_vec(),
                mode: MutationMode::Batch,
            }])
        }
    }
}
