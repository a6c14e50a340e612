//! Source repository provider trait

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Handle to a created source repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoHandle {
    /// Repository name (the slug)
    pub name: String,

    /// Browser URL
    pub html_url: String,

    /// Clone URL
    pub clone_url: String,

    /// Branch the hosting provider builds from
    pub default_branch: String,
}

/// Abstraction over a source-hosting service
///
/// Implementations are side-effect-scoped to exactly one remote system;
/// sequencing across systems belongs to the orchestrator.
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    /// Create a repository. Fails with `Conflict` if the name is taken.
    ///
    /// Not idempotent: callers must never blindly retry this on an
    /// ambiguous failure. Use [`Self::repository_exists`] to decide.
    async fn create_repository(&self, name: &str, description: &str) -> Result<RepoHandle>;

    /// Whether a repository with this name already exists.
    async fn repository_exists(&self, name: &str) -> Result<bool>;

    /// Upsert a file. Safe to call repeatedly with identical content.
    async fn put_file(
        &self,
        repo: &str,
        path: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<()>;

    /// Delete a repository. Fails with `NotFound` if already absent.
    async fn delete_repository(&self, name: &str) -> Result<()>;
}
