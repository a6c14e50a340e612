use crate::utils;
use colored::Colorize;
use siteforge_store::SiteStore;

pub async fn handle(site_id: &str) -> anyhow::Result<()> {
    let store = utils::store()?;
    let site = store
        .get(site_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("site '{}' not found", site_id))?;

    println!("{}", site.name.cyan().bold());
    println!("  id:          {}", site.id);
    println!("  owner:       {}", site.owner_id);
    println!("  contact:     {}", site.contact_email);
    println!("  repository:  {}", site.repository_slug);
    println!("  project:     {}", site.hosting_project_ref);
    println!("  status:      {}", site.staging_status);
    println!("  published:   {}", if site.is_published { "yes" } else { "no" });
    println!("  staging:     {}", site.staging_domain);
    println!(
        "  live domain: {}",
        site.live_domain.as_deref().unwrap_or("(none)")
    );
    if let Some(reason) = &site.unpublished_reason {
        println!("  unpublished: {}", reason.yellow());
    }
    println!("  fee:         {}/month", site.monthly_fee);
    if !site.notes.is_empty() {
        println!("  notes:       {}", site.notes.dimmed());
    }
    println!("  created:     {}", site.created_at.to_rfc3339().dimmed());

    Ok(())
}
