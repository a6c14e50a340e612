//! Named steps and per-step outcome reporting

use serde::Serialize;

/// One step of a lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ValidateRequest,
    CreateRepository,
    SeedTemplate,
    CreateHostingProject,
    AttachDomain,
    ApplyTransition,
    LoadRecord,
    PersistRecord,
    DeleteHostingProject,
    DeleteRepository,
    DeleteRecord,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Step::ValidateRequest => "validate_request",
            Step::CreateRepository => "create_repository",
            Step::SeedTemplate => "seed_template",
            Step::CreateHostingProject => "create_hosting_project",
            Step::AttachDomain => "attach_domain",
            Step::ApplyTransition => "apply_transition",
            Step::LoadRecord => "load_record",
            Step::PersistRecord => "persist_record",
            Step::DeleteHostingProject => "delete_hosting_project",
            Step::DeleteRepository => "delete_repository",
            Step::DeleteRecord => "delete_record",
        };
        write!(f, "{name}")
    }
}

/// Outcome of a single step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub success: bool,
    pub message: String,
    pub error: Option<String>,
}

impl StepReport {
    pub fn success(step: Step, message: impl Into<String>) -> Self {
        Self {
            step,
            success: true,
            message: message.into(),
            error: None,
        }
    }

    pub fn failure(step: Step, error: impl std::fmt::Display) -> Self {
        Self {
            step,
            success: false,
            message: String::new(),
            error: Some(error.to_string()),
        }
    }
}
