//! Record store trait

use crate::error::Result;
use async_trait::async_trait;
use siteforge_core::Site;

/// Persistent store of [`Site`] records.
///
/// The orchestrator receives its store as a constructor-supplied
/// collaborator, so tests can substitute a fake.
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Insert a new record. Fails with `Conflict` if the id or the
    /// repository slug is already taken.
    async fn insert(&self, site: &Site) -> Result<()>;

    /// Replace an existing record. Fails with `NotFound` if absent.
    async fn update(&self, site: &Site) -> Result<()>;

    /// Remove a record, returning it. Fails with `NotFound` if absent.
    async fn remove(&self, id: &str) -> Result<Site>;

    async fn get(&self, id: &str) -> Result<Option<Site>>;

    async fn find_by_slug(&self, repository_slug: &str) -> Result<Option<Site>>;

    /// All records, ordered by creation time.
    async fn list(&self) -> Result<Vec<Site>>;
}
