//! GitHub repository provider for siteforge
//!
//! Implements [`siteforge_providers::RepositoryProvider`] over the GitHub
//! REST v3 API with Bearer token authentication.
//!
//! # Requirements
//!
//! - A token with `repo` and `delete_repo` scopes
//! - `GITHUB_TOKEN` and `GITHUB_OWNER` set when configuring from the
//!   environment

pub mod client;

pub use client::{GithubClient, GithubConfig};
