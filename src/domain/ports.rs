use crate::domain::model::{AuthorHandle, FetchOutcome, ProfileMetrics, ProfileSection, SiteBundle};
use crate::utils::error::{LookupResult, Result};
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// The external bibliometric index, queried by researcher identifier.
#[async_trait]
pub trait ScholarSource: Send + Sync {
    async fn search_author_id(&self, scholar_id: &str) -> LookupResult<AuthorHandle>;

    async fn fill(
        &self,
        author: &AuthorHandle,
        sections: &[ProfileSection],
    ) -> LookupResult<ProfileMetrics>;

    /// Abstract of one publication; `None` when the index has none.
    async fn fill_publication(&self, author_pub_id: &str) -> LookupResult<Option<String>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<FetchOutcome>;
    async fn transform(&self, outcome: FetchOutcome) -> Result<SiteBundle>;
    async fn load(&self, bundle: SiteBundle) -> Result<String>;
}
