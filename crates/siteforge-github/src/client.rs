//! GitHub REST API client

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use siteforge_providers::{ProviderError, RepoHandle, RepositoryProvider, Result};

const GITHUB_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "siteforge";

/// Configuration for the GitHub client
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub token: String,
    /// Account the repositories are created under
    pub owner: String,
}

impl GithubConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .map_err(|_| ProviderError::Validation("GITHUB_TOKEN is not set".into()))?;
        let owner = std::env::var("GITHUB_OWNER")
            .map_err(|_| ProviderError::Validation("GITHUB_OWNER is not set".into()))?;

        Ok(Self { token, owner })
    }
}

/// GitHub repository provider
pub struct GithubClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    owner: String,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self> {
        Self::with_base_url(config, GITHUB_API_BASE)
    }

    /// Point the client at a different API base (used by tests).
    pub fn with_base_url(config: GithubConfig, base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: config.token,
            owner: config.owner,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Look up the blob sha of an existing file, if any.
    ///
    /// Needed for the contents PUT to behave as an upsert: GitHub requires
    /// the current sha when replacing a file.
    async fn existing_file_sha(&self, repo: &str, path: &str) -> Result<Option<String>> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url, self.owner, repo, path
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(transport)?;

        match response.status().as_u16() {
            200 => {
                let file: ContentsResponse = response.json().await.map_err(transport)?;
                Ok(Some(file.sha))
            }
            404 => Ok(None),
            status => Err(api_error(status, response).await),
        }
    }
}

#[async_trait]
impl RepositoryProvider for GithubClient {
    async fn create_repository(&self, name: &str, description: &str) -> Result<RepoHandle> {
        let url = format!("{}/user/repos", self.base_url);
        let request_body = CreateRepoRequest {
            name: name.to_string(),
            description: description.to_string(),
            private: false,
            auto_init: true,
            gitignore_template: "Hugo".to_string(),
        };

        tracing::info!(repo = name, "Creating GitHub repository");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request_body)
            .send()
            .await
            .map_err(transport)?;

        match response.status().as_u16() {
            201 => {
                let repo: RepoResponse = response.json().await.map_err(transport)?;
                Ok(RepoHandle {
                    name: repo.name,
                    html_url: repo.html_url,
                    clone_url: repo.clone_url,
                    default_branch: repo.default_branch,
                })
            }
            // GitHub answers 422 when a repository with this name exists
            422 => Err(ProviderError::Conflict(format!(
                "repository {name} already exists"
            ))),
            status => Err(api_error(status, response).await),
        }
    }

    async fn repository_exists(&self, name: &str) -> Result<bool> {
        let url = format!("{}/repos/{}/{}", self.base_url, self.owner, name);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(transport)?;

        match response.status().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(api_error(status, response).await),
        }
    }

    async fn put_file(
        &self,
        repo: &str,
        path: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<()> {
        let sha = self.existing_file_sha(repo, path).await?;
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url, self.owner, repo, path
        );

        let request_body = PutFileRequest {
            message: commit_message.to_string(),
            content: BASE64.encode(content),
            sha,
        };

        tracing::debug!(repo, path, "Upserting repository file");
        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .json(&request_body)
            .send()
            .await
            .map_err(transport)?;

        match response.status().as_u16() {
            200 | 201 => Ok(()),
            status => Err(api_error(status, response).await),
        }
    }

    async fn delete_repository(&self, name: &str) -> Result<()> {
        let url = format!("{}/repos/{}/{}", self.base_url, self.owner, name);

        tracing::info!(repo = name, "Deleting GitHub repository");
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(transport)?;

        match response.status().as_u16() {
            204 => Ok(()),
            404 => Err(ProviderError::NotFound(format!(
                "repository {name} does not exist"
            ))),
            status => Err(api_error(status, response).await),
        }
    }
}

fn transport(e: reqwest::Error) -> ProviderError {
    ProviderError::Transport(e.to_string())
}

async fn api_error(status: u16, response: reqwest::Response) -> ProviderError {
    let body = response.text().await.unwrap_or_default();
    ProviderError::Api { status, body }
}

// ============ API Types ============

#[derive(Debug, Serialize)]
struct CreateRepoRequest {
    name: String,
    description: String,
    private: bool,
    auto_init: bool,
    gitignore_template: String,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    name: String,
    html_url: String,
    clone_url: String,
    default_branch: String,
}

#[derive(Debug, Serialize)]
struct PutFileRequest {
    message: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
}
