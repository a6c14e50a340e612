//! Static-site hosting provider trait

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Build configuration for a hosting project.
///
/// The orchestrator supplies a fixed constant here; it is never
/// client-configurable, so every site builds the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    pub build_command: String,
    pub output_dir: String,
    pub root_dir: String,
}

/// Binding from a hosting project to its source repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceBinding {
    /// Account owning the repository at the source host
    pub owner: String,

    /// Repository name at the source host
    pub repository: String,

    /// Branch that production deployments build from
    pub production_branch: String,
}

/// A created hosting project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostingProject {
    /// Provider-assigned opaque identifier
    pub id: String,

    /// Project name (doubles as the addressing key for domain and
    /// deletion calls on providers that key by name)
    pub name: String,

    /// Hostname the provider assigned for staged previews
    pub preview_domain: String,
}

/// Abstraction over a static-site hosting service
#[async_trait]
pub trait HostingProvider: Send + Sync {
    /// Create a deployment project bound to a repository.
    async fn create_project(
        &self,
        name: &str,
        source: &SourceBinding,
        build: &BuildConfig,
    ) -> Result<HostingProject>;

    /// Attach a custom domain to a project. Fails with `Validation` if the
    /// hostname is malformed, `Conflict` if attached elsewhere.
    async fn attach_custom_domain(&self, project_name: &str, domain: &str) -> Result<()>;

    /// Delete a project. Fails with `NotFound` if already absent.
    async fn delete_project(&self, project_name: &str) -> Result<()>;
}
