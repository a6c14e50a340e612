//! siteforge core types
//!
//! This crate holds the pure heart of siteforge: the [`Site`] record, the
//! lifecycle transition function, repository-slug derivation, and the
//! deterministic template seeder. Nothing here performs I/O; every function
//! can be exercised without a network or a filesystem.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              siteforge-provision                 │
//! │          (orchestrated lifecycle ops)            │
//! └───────┬──────────────┬──────────────┬───────────┘
//!         │              │              │
//! ┌───────▼──────┐ ┌─────▼──────┐ ┌─────▼──────────┐
//! │  transition  │ │    slug    │ │     seed       │
//! │ (state mach.)│ │ (derive)   │ │ (starter files)│
//! └──────────────┘ └────────────┘ └────────────────┘
//! ```

pub mod error;
pub mod model;
pub mod seed;
pub mod slug;
pub mod transition;

// Re-exports
pub use error::{CoreError, Result};
pub use model::{Site, StagingStatus};
pub use seed::{SeedFile, seed};
pub use slug::{SLUG_PREFIX, derive_slug};
pub use transition::{Transition, apply};
