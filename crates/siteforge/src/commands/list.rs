use crate::utils;
use colored::Colorize;
use siteforge_store::SiteStore;

pub async fn handle() -> anyhow::Result<()> {
    let store = utils::store()?;
    let sites = store.list().await?;

    if sites.is_empty() {
        println!("{}", "No sites yet".dimmed());
        println!("Create one with: {} create <name> -o <owner> -e <email>", "sf".cyan());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<38} {:<24} {:<9} {:<10} {:<30}",
            "ID", "NAME", "STATUS", "PUBLISHED", "DOMAIN"
        )
        .bold()
    );
    println!("{}", "─".repeat(113).dimmed());

    for site in sites {
        let status = site.staging_status.to_string();
        let status_colored = match status.as_str() {
            "live" => status.green(),
            "preview" => status.yellow(),
            _ => status.dimmed(),
        };
        let published = if site.is_published {
            "yes".green()
        } else {
            "no".dimmed()
        };
        let domain = site
            .live_domain
            .as_deref()
            .unwrap_or(&site.staging_domain);

        println!(
            "{:<38} {:<24} {:<9} {:<10} {:<30}",
            site.id.cyan(),
            site.name,
            status_colored,
            published,
            domain.dimmed()
        );
    }

    Ok(())
}
