//! Cloudflare Pages API client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use siteforge_providers::{
    BuildConfig, HostingProject, HostingProvider, ProviderError, Result, SourceBinding,
};

const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Configuration for the Pages client
#[derive(Debug, Clone)]
pub struct CloudflarePagesConfig {
    pub api_token: String,
    pub account_id: String,
}

impl CloudflarePagesConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var("CLOUDFLARE_API_TOKEN")
            .map_err(|_| ProviderError::Validation("CLOUDFLARE_API_TOKEN is not set".into()))?;
        let account_id = std::env::var("CLOUDFLARE_ACCOUNT_ID")
            .map_err(|_| ProviderError::Validation("CLOUDFLARE_ACCOUNT_ID is not set".into()))?;

        Ok(Self { api_token, account_id })
    }
}

/// Cloudflare Pages hosting provider
pub struct CloudflarePages {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    account_id: String,
}

impl CloudflarePages {
    pub fn new(config: CloudflarePagesConfig) -> Self {
        Self::with_base_url(config, CLOUDFLARE_API_BASE)
    }

    /// Point the client at a different API base (used by tests).
    pub fn with_base_url(config: CloudflarePagesConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_token: config.api_token,
            account_id: config.account_id,
        }
    }

    fn projects_url(&self) -> String {
        format!("{}/accounts/{}/pages/projects", self.base_url, self.account_id)
    }
}

#[async_trait]
impl HostingProvider for CloudflarePages {
    async fn create_project(
        &self,
        name: &str,
        source: &SourceBinding,
        build: &BuildConfig,
    ) -> Result<HostingProject> {
        let request_body = CreateProjectRequest {
            name: name.to_string(),
            production_branch: source.production_branch.clone(),
            source: ProjectSource {
                r#type: "github".to_string(),
                config: ProjectSourceConfig {
                    owner: source.owner.clone(),
                    repo_name: source.repository.clone(),
                    production_branch: source.production_branch.clone(),
                    pr_comments_enabled: false,
                },
            },
            build_config: ProjectBuildConfig {
                build_command: build.build_command.clone(),
                destination_dir: build.output_dir.clone(),
                root_dir: build.root_dir.clone(),
            },
        };

        tracing::info!(project = name, "Creating Cloudflare Pages project");
        let response = self
            .client
            .post(self.projects_url())
            .bearer_auth(&self.api_token)
            .json(&request_body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let envelope: ApiResponse<ProjectResponse> =
            response.json().await.map_err(transport)?;

        if !envelope.success {
            return Err(envelope_error(status, &envelope.errors));
        }
        let project = envelope
            .result
            .ok_or_else(|| ProviderError::Api { status, body: "empty result".into() })?;

        Ok(HostingProject {
            id: project.id,
            name: project.name,
            preview_domain: project.subdomain,
        })
    }

    async fn attach_custom_domain(&self, project_name: &str, domain: &str) -> Result<()> {
        if !is_valid_hostname(domain) {
            return Err(ProviderError::Validation(format!(
                "{domain:?} is not a valid hostname"
            )));
        }

        let url = format!("{}/{}/domains", self.projects_url(), project_name);
        tracing::info!(project = project_name, domain, "Attaching custom domain");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&AttachDomainRequest { name: domain.to_string() })
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let envelope: ApiResponse<serde_json::Value> =
            response.json().await.map_err(transport)?;

        if envelope.success {
            return Ok(());
        }
        if status == 409 {
            return Err(ProviderError::Conflict(format!(
                "domain {domain} is already attached to another project"
            )));
        }
        Err(envelope_error(status, &envelope.errors))
    }

    async fn delete_project(&self, project_name: &str) -> Result<()> {
        let url = format!("{}/{}", self.projects_url(), project_name);

        tracing::info!(project = project_name, "Deleting Cloudflare Pages project");
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(ProviderError::NotFound(format!(
                "project {project_name} does not exist"
            )));
        }

        let envelope: ApiResponse<serde_json::Value> =
            response.json().await.map_err(transport)?;
        if !envelope.success {
            return Err(envelope_error(status, &envelope.errors));
        }
        Ok(())
    }
}

fn transport(e: reqwest::Error) -> ProviderError {
    ProviderError::Transport(e.to_string())
}

fn envelope_error(status: u16, errors: &[ApiError]) -> ProviderError {
    let body = errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "Unknown error".to_string());
    ProviderError::Api { status, body }
}

/// Hostname check: dotted labels of `[a-z0-9-]`, no leading or trailing
/// hyphen in a label, no scheme or path.
fn is_valid_hostname(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > 253 || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    })
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    result: Option<T>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[allow(dead_code)]
    code: i32,
    message: String,
}

#[derive(Debug, Serialize)]
struct CreateProjectRequest {
    name: String,
    production_branch: String,
    source: ProjectSource,
    build_config: ProjectBuildConfig,
}

#[derive(Debug, Serialize)]
struct ProjectSource {
    #[serde(rename = "type")]
    r#type: String,
    config: ProjectSourceConfig,
}

#[derive(Debug, Serialize)]
struct ProjectSourceConfig {
    owner: String,
    repo_name: String,
    production_branch: String,
    pr_comments_enabled: bool,
}

#[derive(Debug, Serialize)]
struct ProjectBuildConfig {
    build_command: String,
    destination_dir: String,
    root_dir: String,
}

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    id: String,
    name: String,
    subdomain: String,
}

#[derive(Debug, Serialize)]
struct AttachDomainRequest {
    name: String,
}
