//! Site record persistence
//!
//! [`SiteStore`] is the seam the orchestrator writes through; the file
//! implementation keeps every record in a versioned `sites.json` with a
//! backup taken before each save. The store owns the uniqueness constraint
//! on `repository_slug`, so a losing concurrent create fails fast with a
//! conflict instead of silently overwriting state.

pub mod error;
pub mod file;
pub mod store;

// Re-exports
pub use error::{Result, StoreError};
pub use file::JsonFileStore;
pub use store::SiteStore;
