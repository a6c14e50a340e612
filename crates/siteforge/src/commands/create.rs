use crate::utils;
use colored::Colorize;
use siteforge_provision::NewSite;

pub async fn handle(
    name: String,
    owner: String,
    email: String,
    domain: Option<String>,
    fee: f64,
    notes: String,
) -> anyhow::Result<()> {
    println!("{}", format!("Creating site for {name}...").blue());

    let provisioner = utils::provisioner()?;
    let request = NewSite {
        name,
        owner_id: owner,
        contact_email: email,
        live_domain: domain,
        monthly_fee: fee,
        notes,
    };

    match provisioner.create_site(request).await {
        Ok(outcome) => {
            utils::print_steps(&outcome.steps);
            println!();
            println!("{}", "✓ Site created".green().bold());
            println!("  id:      {}", outcome.site.id.cyan());
            println!("  repo:    {}", outcome.site.repository_slug.cyan());
            println!("  preview: {}", outcome.site.staging_domain.cyan());
            println!();
            println!("{}", "Next:".bold());
            println!("  {} stage {}", "sf".cyan(), outcome.site.id);
        }
        Err(e) => {
            utils::print_failure(&e);
            std::process::exit(1);
        }
    }

    Ok(())
}
