use crate::utils;
use colored::Colorize;
use siteforge_provision::DeleteOptions;
use siteforge_store::SiteStore;

pub async fn handle(
    site_id: &str,
    delete_repository: bool,
    delete_hosting_project: bool,
    yes: bool,
) -> anyhow::Result<()> {
    let store = utils::store()?;
    let site = store
        .get(site_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("site '{}' not found", site_id))?;

    println!("Deleting {} ({}):", site.name.cyan(), site.id);
    println!("  • site record");
    if delete_hosting_project {
        println!("  • hosting project {}", site.repository_slug.cyan());
    }
    if delete_repository {
        println!("  • repository {}", site.repository_slug.cyan());
    }

    if !yes {
        println!();
        println!("{}", "Warning: this cannot be undone.".yellow());
        println!("Pass --yes to proceed");
        return Ok(());
    }

    let provisioner = utils::provisioner()?;
    let options = DeleteOptions {
        delete_repository,
        delete_hosting_project,
    };

    println!();
    match provisioner.delete_site(site_id, options).await {
        Ok(report) => {
            utils::print_steps(&report.steps);
            println!();
            if report.is_success() {
                println!("{}", "✓ Site deleted".green().bold());
            } else {
                // The record is gone, but an external deletion failed.
                println!("{}", "⚠ Site record deleted with warnings".yellow().bold());
                println!("  Some external resources may need manual cleanup.");
            }
        }
        Err(e) => {
            utils::print_failure(&e);
            std::process::exit(1);
        }
    }

    Ok(())
}
