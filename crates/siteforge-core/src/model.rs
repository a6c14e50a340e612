//! The persisted Site record and its publication status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One client's provisioned website and its publication state.
///
/// Invariants maintained by [`crate::transition::apply`]:
/// - `repository_slug` is set exactly once, at creation
/// - `staging_domain` is non-empty only after the hosting project exists
/// - `staging_status == Live` requires a live domain and a hosting project
/// - `is_published == true` implies `staging_status == Live`
/// - `unpublished_reason` is set only by an explicit unpublish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Stable unique identifier, assigned at creation
    pub id: String,

    /// Operator-supplied display name
    pub name: String,

    /// Account that created the site
    pub owner_id: String,

    /// Client contact address
    pub contact_email: String,

    /// Derived, immutable, unique across all sites
    pub repository_slug: String,

    /// Hostname assigned by the hosting provider; empty until provisioned
    #[serde(default)]
    pub staging_domain: String,

    /// Operator-supplied custom hostname
    pub live_domain: Option<String>,

    /// Opaque external identifier of the hosting project; empty until created
    #[serde(default)]
    pub hosting_project_ref: String,

    pub staging_status: StagingStatus,

    /// Operator-controlled visibility flag, independent of `staging_status`
    pub is_published: bool,

    /// Set only when unpublished by explicit operator action
    pub unpublished_reason: Option<String>,

    /// Informational, non-negative
    pub monthly_fee: f64,

    #[serde(default)]
    pub notes: String,

    /// Immutable creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Site {
    /// Create a fresh draft record with no external resources attached.
    pub fn new_draft(
        id: impl Into<String>,
        name: impl Into<String>,
        owner_id: impl Into<String>,
        contact_email: impl Into<String>,
        repository_slug: impl Into<String>,
        live_domain: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner_id: owner_id.into(),
            contact_email: contact_email.into(),
            repository_slug: repository_slug.into(),
            staging_domain: String::new(),
            live_domain,
            hosting_project_ref: String::new(),
            staging_status: StagingStatus::Draft,
            is_published: false,
            unpublished_reason: None,
            monthly_fee: 0.0,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether the external hosting project has been created.
    pub fn is_provisioned(&self) -> bool {
        !self.hosting_project_ref.is_empty()
    }
}

/// Publication status of the staged site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StagingStatus {
    /// Record exists, external resources may not
    Draft,
    /// Reachable on the provider-assigned staging domain
    Preview,
    /// Bound to the operator's custom domain
    Live,
}

impl std::fmt::Display for StagingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StagingStatus::Draft => write!(f, "draft"),
            StagingStatus::Preview => write!(f, "preview"),
            StagingStatus::Live => write!(f, "live"),
        }
    }
}
