//! Free-text title → catalog id resolution.
//!
//! Titles are searched one at a time, in input order. The catalog's own
//! relevance ranking is trusted: the first search hit wins.

use showlink_api::{ApiError, CatalogClient, SeriesId, Transport};

use crate::models::{Resolution, TitleResolution};
use crate::normalize::normalize;

pub struct CatalogResolver<'a, T> {
    client: &'a CatalogClient<T>,
}

impl<'a, T: Transport> CatalogResolver<'a, T> {
    pub fn new(client: &'a CatalogClient<T>) -> Self {
        Self { client }
    }

    /// Id of the top search hit for an already-normalized title.
    async fn lookup(&self, normalized: &str) -> Result<Option<SeriesId>, ApiError> {
        let resp = self.client.search_tv(normalized).await?;
        Ok(resp.results.first().map(|r| r.id))
    }

    /// Resolve titles to ids, dropping titles with no search hit.
    ///
    /// The output can be shorter than the input, and positions no longer
    /// line up once a title is dropped. Any failed search aborts the whole
    /// call.
    pub async fn resolve<S: AsRef<str>>(&self, titles: &[S]) -> Result<Vec<SeriesId>, ApiError> {
        let mut ids = Vec::with_capacity(titles.len());

        for title in titles {
            let normalized = normalize(title.as_ref());
            match self.lookup(&normalized).await? {
                Some(id) => ids.push(id),
                None => tracing::warn!(title = %normalized, "series not found"),
            }
        }

        tracing::info!(?ids, "resolved series ids");
        Ok(ids)
    }

    /// Resolve every title, keeping one entry per input position.
    ///
    /// A failed search is recorded on its own title and does not stop the
    /// remaining lookups.
    pub async fn resolve_each<S: AsRef<str>>(&self, titles: &[S]) -> Vec<TitleResolution> {
        let mut resolutions = Vec::with_capacity(titles.len());

        for title in titles {
            let title = title.as_ref();
            let normalized = normalize(title);
            let resolution = match self.lookup(&normalized).await {
                Ok(Some(id)) => Resolution::Resolved(id),
                Ok(None) => {
                    tracing::warn!(title = %normalized, "series not found");
                    Resolution::Unresolved
                }
                Err(e) => {
                    tracing::error!(title = %normalized, error = %e, "series search failed");
                    Resolution::Failed(e.to_string())
                }
            };
            resolutions.push(TitleResolution {
                title: title.to_string(),
                normalized,
                resolution,
            });
        }

        resolutions
    }
}
