//! Provisioning orchestrator
//!
//! The only component allowed to sequence multi-step work. Each lifecycle
//! operation runs its remote steps strictly in order, records a
//! [`StepReport`] per step, and persists the resulting [`Site`] only after
//! every preceding remote step succeeded. On failure the error names the
//! failed step and carries the reports of everything completed before it,
//! so an operator can see exactly where a partially provisioned site
//! stopped.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                   Provisioner                     │
//! │   create / stage / golive / unpublish / delete    │
//! └──────┬───────────────┬────────────────┬──────────┘
//!        │               │                │
//! ┌──────▼──────┐ ┌──────▼───────┐ ┌──────▼───────┐
//! │ Repository  │ │   Hosting    │ │  SiteStore   │
//! │  Provider   │ │   Provider   │ │  (records)   │
//! └─────────────┘ └──────────────┘ └──────────────┘
//! ```

pub mod api;
pub mod error;
pub mod orchestrator;
pub mod step;

// Re-exports
pub use error::{ErrorKind, OperationError, ProvisionError};
pub use orchestrator::{
    DeleteOptions, DeleteReport, NewSite, Provisioner, ProvisionerConfig, SiteOutcome,
};
pub use step::{Step, StepReport};
