//! Operations exposed to callers: resolve titles, add series to favorites
//! or to a list, and the two read-only pass-throughs.

use futures::stream::{self, StreamExt};
use showlink_api::{CatalogClient, SeriesId, Transport};

use crate::builder::{self, OutboundRequest};
use crate::config::MutationConfig;
use crate::error::CoreError;
use crate::models::{BatchResult, MutationTarget, OutcomeStatus, TitleResolution};
use crate::reconcile::{fail_all, reconcile};
use crate::report;
use crate::resolver::CatalogResolver;

pub const FAVORITES_ACTION: &str = "added to favorites";
pub const LIST_ACTION: &str = "added to the list";

#[derive(Debug, Clone, Copy)]
pub struct MutationSettings {
    /// Upper bound on mutation calls in flight. A validated config never
    /// yields 0; if one is set directly, `mutate` runs one call at a time.
    pub max_concurrency: usize,
}

impl Default for MutationSettings {
    fn default() -> Self {
        Self { max_concurrency: 4 }
    }
}

impl From<&MutationConfig> for MutationSettings {
    fn from(config: &MutationConfig) -> Self {
        Self {
            max_concurrency: config.max_concurrency,
        }
    }
}

pub struct WatchlistService<T> {
    client: CatalogClient<T>,
    settings: MutationSettings,
}

impl<T: Transport> WatchlistService<T> {
    pub fn new(client: CatalogClient<T>, settings: MutationSettings) -> Self {
        Self { client, settings }
    }

    pub fn client(&self) -> &CatalogClient<T> {
        &self.client
    }

    /// Titles → ids. Unmatched titles are dropped; a failed search fails
    /// the whole call.
    pub async fn resolve_titles<S: AsRef<str>>(
        &self,
        titles: &[S],
    ) -> Result<Vec<SeriesId>, CoreError> {
        Ok(CatalogResolver::new(&self.client).resolve(titles).await?)
    }

    /// Titles → one resolution per title, in input order.
    pub async fn resolve_titles_detailed<S: AsRef<str>>(
        &self,
        titles: &[S],
    ) -> Vec<TitleResolution> {
        CatalogResolver::new(&self.client).resolve_each(titles).await
    }

    pub async fn apply_favorites(
        &self,
        ids: &[SeriesId],
        account_id: &str,
        session_id: &str,
    ) -> Result<String, CoreError> {
        let target = MutationTarget::Favorites {
            account_id: account_id.to_string(),
            session_id: session_id.to_string(),
        };
        let result = self.mutate(ids, &target).await?;
        Ok(report::format(&result, FAVORITES_ACTION))
    }

    pub async fn apply_list_mutation(
        &self,
        ids: &[SeriesId],
        list_id: &str,
        session_id: &str,
    ) -> Result<String, CoreError> {
        let target = MutationTarget::CustomList {
            list_id: list_id.to_string(),
            session_id: session_id.to_string(),
        };
        let result = self.mutate(ids, &target).await?;
        Ok(report::format(&result, LIST_ACTION))
    }

    /// Add `ids` to `target`, returning one outcome per id in input order.
    ///
    /// Per-item calls run concurrently up to the configured limit. A call
    /// that fails only affects the ids it carried.
    pub async fn mutate(
        &self,
        ids: &[SeriesId],
        target: &MutationTarget,
    ) -> Result<BatchResult, CoreError> {
        let requests = builder::build(ids, target)
            .map_err(|e| CoreError::Internal(format!("failed to build mutation payload: {e}")))?;
        let limit = self.settings.max_concurrency.max(1);

        let per_call: Vec<BatchResult> = stream::iter(requests)
            .map(|outbound| self.dispatch(outbound))
            .buffered(limit)
            .collect()
            .await;
        let result: BatchResult = per_call.into_iter().flatten().collect();

        if result.len() != ids.len() {
            return Err(CoreError::Internal(format!(
                "{} outcomes for {} requested ids",
                result.len(),
                ids.len()
            )));
        }

        let succeeded = result
            .iter()
            .filter(|o| o.status == OutcomeStatus::Success)
            .count();
        tracing::info!(
            requested = ids.len(),
            succeeded,
            mode = ?target.mode(),
            "mutation finished"
        );
        Ok(result)
    }

    async fn dispatch(&self, outbound: OutboundRequest) -> BatchResult {
        match self.client.send(outbound.request).await {
            Ok(resp) => reconcile(&resp, &outbound.requested, outbound.mode),
            Err(e) => {
                tracing::error!(ids = ?outbound.requested, error = %e, "mutation call failed");
                fail_all(&outbound.requested, &e.to_string())
            }
        }
    }

    /// The account's favorite series, as the catalog returns them.
    pub async fn list_favorites(
        &self,
        account_id: &str,
        session_id: &str,
    ) -> Result<serde_json::Value, CoreError> {
        tracing::info!(account_id, "listing favorite series");
        Ok(self.client.favorite_tv(account_id, session_id).await?)
    }

    /// This week's trending series, as the catalog returns them.
    pub async fn trending(&self) -> Result<Vec<serde_json::Value>, CoreError> {
        Ok(self.client.trending_tv_week().await?)
    }
}
