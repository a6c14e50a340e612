use colored::Colorize;
use siteforge_cloudflare::{CloudflarePages, CloudflarePagesConfig};
use siteforge_github::{GithubClient, GithubConfig};
use siteforge_providers::RetryConfig;
use siteforge_provision::{ProvisionError, Provisioner, ProvisionerConfig, StepReport};
use siteforge_store::JsonFileStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Where site records live. `SITEFORGE_DATA_DIR` overrides the platform
/// data directory.
pub fn data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("SITEFORGE_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("no data directory available; set SITEFORGE_DATA_DIR"))?;
    Ok(base.join("siteforge"))
}

pub fn store() -> anyhow::Result<Arc<JsonFileStore>> {
    Ok(Arc::new(JsonFileStore::new(data_dir()?)))
}

/// Wire the orchestrator to the real providers, configured from the
/// environment.
pub fn provisioner() -> anyhow::Result<Provisioner> {
    let github = GithubConfig::from_env()?;
    let repo_owner = github.owner.clone();
    let repos = Arc::new(GithubClient::new(github)?);
    let hosting = Arc::new(CloudflarePages::new(CloudflarePagesConfig::from_env()?));

    Ok(Provisioner::new(
        repos,
        hosting,
        store()?,
        ProvisionerConfig {
            repo_owner,
            retry: RetryConfig::default(),
        },
    ))
}

pub fn print_steps(steps: &[StepReport]) {
    for step in steps {
        if step.success {
            println!("  {} {} {}", "✓".green(), step.step, step.message.dimmed());
        } else {
            println!(
                "  {} {} {}",
                "✗".red(),
                step.step,
                step.error.as_deref().unwrap_or("").red()
            );
        }
    }
}

pub fn print_failure(e: &ProvisionError) {
    eprintln!();
    eprintln!("{} {} (step '{}')", "✗".red().bold(), e.kind(), e.step);
    eprintln!("  {}", e.source);
    eprintln!();
    print_steps(&e.steps);
}
