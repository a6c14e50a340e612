//! Provider abstraction for siteforge
//!
//! The orchestrator talks to two independent remote systems: a source
//! repository host and a static-site host. This crate defines the traits
//! both are consumed through, the shared error taxonomy, and the retry
//! policy for idempotent calls. Concrete implementations live in
//! `siteforge-github` and `siteforge-cloudflare`.

pub mod error;
pub mod hosting;
pub mod repository;
pub mod retry;

// Re-exports
pub use error::{ProviderError, Result};
pub use hosting::{BuildConfig, HostingProject, HostingProvider, SourceBinding};
pub use repository::{RepoHandle, RepositoryProvider};
pub use retry::{RetryConfig, with_retry};
