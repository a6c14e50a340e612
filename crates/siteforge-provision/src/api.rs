//! JSON boundary for the lifecycle operations
//!
//! Request and response shapes for driving the orchestrator from a
//! serialized surface. Every response is the same envelope: a success
//! flag, the resulting record when there is one, a classified error when
//! there is not, and the per-step reports either way.

use crate::error::{ErrorKind, ProvisionError};
use crate::orchestrator::{DeleteOptions, NewSite, Provisioner, SiteOutcome};
use crate::step::{Step, StepReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct CreateSiteRequest {
    pub name: String,
    pub owner_id: String,
    pub contact_email: String,
    #[serde(default)]
    pub live_domain: Option<String>,
    #[serde(default)]
    pub monthly_fee: f64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct PublishToStagingRequest {
    pub site_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PublishToLiveRequest {
    pub site_id: String,
    #[serde(default)]
    pub live_domain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UnpublishRequest {
    pub site_id: String,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteSiteRequest {
    pub site_id: String,
    #[serde(default)]
    pub delete_repository: bool,
    #[serde(default)]
    pub delete_hosting_project: bool,
}

/// Envelope every operation answers with
#[derive(Debug, Serialize)]
pub struct OperationResponse {
    pub success: bool,

    /// The resulting site record on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,

    /// The step the operation stopped at, on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_step: Option<Step>,

    pub steps: Vec<StepReport>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

pub async fn create_site(
    provisioner: &Provisioner,
    request: CreateSiteRequest,
) -> OperationResponse {
    respond(
        provisioner
            .create_site(NewSite {
                name: request.name,
                owner_id: request.owner_id,
                contact_email: request.contact_email,
                live_domain: request.live_domain,
                monthly_fee: request.monthly_fee,
                notes: request.notes,
            })
            .await,
    )
}

pub async fn publish_to_staging(
    provisioner: &Provisioner,
    request: PublishToStagingRequest,
) -> OperationResponse {
    respond(provisioner.publish_to_staging(&request.site_id).await)
}

pub async fn publish_to_live(
    provisioner: &Provisioner,
    request: PublishToLiveRequest,
) -> OperationResponse {
    respond(
        provisioner
            .publish_to_live(&request.site_id, request.live_domain)
            .await,
    )
}

pub async fn unpublish(
    provisioner: &Provisioner,
    request: UnpublishRequest,
) -> OperationResponse {
    respond(
        provisioner
            .unpublish(&request.site_id, &request.reason)
            .await,
    )
}

pub async fn delete_site(
    provisioner: &Provisioner,
    request: DeleteSiteRequest,
) -> OperationResponse {
    let options = DeleteOptions {
        delete_repository: request.delete_repository,
        delete_hosting_project: request.delete_hosting_project,
    };
    match provisioner.delete_site(&request.site_id, options).await {
        Ok(report) => OperationResponse {
            success: report.is_success(),
            result: serde_json::to_value(&report.removed).ok(),
            error: None,
            failed_step: report
                .steps
                .iter()
                .find(|s| !s.success)
                .map(|s| s.step),
            steps: report.steps,
        },
        Err(e) => failure(e),
    }
}

fn respond(result: Result<SiteOutcome, ProvisionError>) -> OperationResponse {
    match result {
        Ok(outcome) => OperationResponse {
            success: true,
            result: serde_json::to_value(&outcome.site).ok(),
            error: None,
            failed_step: None,
            steps: outcome.steps,
        },
        Err(e) => failure(e),
    }
}

fn failure(e: ProvisionError) -> OperationResponse {
    OperationResponse {
        success: false,
        result: None,
        error: Some(ErrorBody {
            kind: e.kind(),
            message: e.source.to_string(),
        }),
        failed_step: Some(e.step),
        steps: e.steps,
    }
}
