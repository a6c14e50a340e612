//! Lifecycle state machine
//!
//! Pure transition logic over a [`Site`]'s publication fields. Every
//! mutating operation in the orchestrator funnels through [`apply`], so
//! each transition can be unit tested without a single remote call.

use crate::error::{CoreError, Result};
use crate::model::{Site, StagingStatus};

/// A requested change to a site's publication state
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Record the freshly created external resources on a draft site.
    Provision {
        staging_domain: String,
        hosting_project_ref: String,
    },
    /// Make the staged preview the site's advertised state.
    PromoteToPreview,
    /// Bind the custom domain and flip the site public.
    PromoteToLive,
    /// Hide the site from public view without touching external state.
    Unpublish { reason: String },
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Transition::Provision { .. } => "provision",
            Transition::PromoteToPreview => "promote_to_preview",
            Transition::PromoteToLive => "promote_to_live",
            Transition::Unpublish { .. } => "unpublish",
        }
    }
}

/// Apply a transition, returning the updated site.
///
/// All-or-nothing: on a precondition failure the input site is untouched
/// (the caller still holds it unchanged) and an error describes what was
/// violated.
pub fn apply(site: &Site, transition: &Transition) -> Result<Site> {
    match transition {
        Transition::Provision {
            staging_domain,
            hosting_project_ref,
        } => {
            if !site.staging_domain.is_empty() || !site.hosting_project_ref.is_empty() {
                return Err(CoreError::InvalidTransition(format!(
                    "site {} is already provisioned (staging domain {:?})",
                    site.id, site.staging_domain
                )));
            }
            if staging_domain.is_empty() || hosting_project_ref.is_empty() {
                return Err(CoreError::InvalidTransition(
                    "provision requires a staging domain and a hosting project reference".into(),
                ));
            }
            let mut next = site.clone();
            next.staging_domain = staging_domain.clone();
            next.hosting_project_ref = hosting_project_ref.clone();
            Ok(next)
        }

        Transition::PromoteToPreview => {
            if site.staging_domain.is_empty() {
                return Err(CoreError::InvalidTransition(format!(
                    "site {} has no staging domain; provision it first",
                    site.id
                )));
            }
            let mut next = site.clone();
            next.staging_status = StagingStatus::Preview;
            Ok(next)
        }

        Transition::PromoteToLive => {
            let live_domain = site.live_domain.as_deref().unwrap_or("");
            if live_domain.is_empty() {
                return Err(CoreError::Validation(format!(
                    "site {} has no live domain set",
                    site.id
                )));
            }
            if site.hosting_project_ref.is_empty() {
                return Err(CoreError::Validation(format!(
                    "site {} has no hosting project; provision it first",
                    site.id
                )));
            }
            let mut next = site.clone();
            next.staging_status = StagingStatus::Live;
            next.is_published = true;
            next.unpublished_reason = None;
            Ok(next)
        }

        Transition::Unpublish { reason } => {
            if reason.trim().is_empty() {
                return Err(CoreError::Validation(
                    "unpublish requires a non-empty reason".into(),
                ));
            }
            // staging_status is left alone: a hidden site keeps its
            // custom-domain binding and can be republished without
            // reattaching the domain.
            let mut next = site.clone();
            next.is_published = false;
            next.unpublished_reason = Some(reason.clone());
            Ok(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Site {
        Site::new_draft("s-1", "Acme Corp", "owner-1", "a@acme.com", "sf-client-acme-corp", None)
    }

    fn provisioned() -> Site {
        apply(
            &draft(),
            &Transition::Provision {
                staging_domain: "sf-client-acme-corp.pages.dev".into(),
                hosting_project_ref: "proj-123".into(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_provision_populates_fields() {
        let site = provisioned();
        assert_eq!(site.staging_domain, "sf-client-acme-corp.pages.dev");
        assert_eq!(site.hosting_project_ref, "proj-123");
        assert_eq!(site.staging_status, StagingStatus::Draft);
    }

    #[test]
    fn test_provision_rejects_reprovisioning() {
        let site = provisioned();
        let err = apply(
            &site,
            &Transition::Provision {
                staging_domain: "other.pages.dev".into(),
                hosting_project_ref: "proj-999".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition(_)));
    }

    #[test]
    fn test_provision_rejects_empty_inputs() {
        let err = apply(
            &draft(),
            &Transition::Provision {
                staging_domain: String::new(),
                hosting_project_ref: "proj-123".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition(_)));
    }

    #[test]
    fn test_promote_to_preview() {
        let site = apply(&provisioned(), &Transition::PromoteToPreview).unwrap();
        assert_eq!(site.staging_status, StagingStatus::Preview);
        assert!(!site.is_published);
    }

    #[test]
    fn test_promote_to_preview_requires_staging_domain() {
        let err = apply(&draft(), &Transition::PromoteToPreview).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition(_)));
    }

    #[test]
    fn test_promote_to_live_without_domain_is_validation_error() {
        let site = provisioned();
        let err = apply(&site, &Transition::PromoteToLive).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        // The input is untouched.
        assert_eq!(site.staging_status, StagingStatus::Draft);
        assert!(!site.is_published);
    }

    #[test]
    fn test_promote_to_live() {
        let mut site = provisioned();
        site.live_domain = Some("acme.com".into());
        site.unpublished_reason = Some("maintenance".into());

        let next = apply(&site, &Transition::PromoteToLive).unwrap();
        assert_eq!(next.staging_status, StagingStatus::Live);
        assert!(next.is_published);
        assert!(next.unpublished_reason.is_none());
    }

    #[test]
    fn test_unpublish_keeps_staging_status() {
        let mut site = provisioned();
        site.live_domain = Some("acme.com".into());
        let live = apply(&site, &Transition::PromoteToLive).unwrap();

        let hidden = apply(&live, &Transition::Unpublish { reason: "maintenance".into() }).unwrap();
        assert!(!hidden.is_published);
        assert_eq!(hidden.unpublished_reason.as_deref(), Some("maintenance"));
        assert_eq!(hidden.staging_status, StagingStatus::Live);
        assert_eq!(hidden.live_domain.as_deref(), Some("acme.com"));
    }

    #[test]
    fn test_unpublish_empty_reason_rejected() {
        let err = apply(&provisioned(), &Transition::Unpublish { reason: "  ".into() }).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_republish_after_unpublish() {
        let mut site = provisioned();
        site.live_domain = Some("acme.com".into());
        let live = apply(&site, &Transition::PromoteToLive).unwrap();
        let hidden = apply(&live, &Transition::Unpublish { reason: "billing".into() }).unwrap();

        let republished = apply(&hidden, &Transition::PromoteToLive).unwrap();
        assert!(republished.is_published);
        assert!(republished.unpublished_reason.is_none());
    }
}
