use crate::utils;
use colored::Colorize;

pub async fn handle(site_id: &str, domain: Option<String>) -> anyhow::Result<()> {
    println!("{}", "Publishing to live...".blue());

    let provisioner = utils::provisioner()?;
    match provisioner.publish_to_live(site_id, domain).await {
        Ok(outcome) => {
            utils::print_steps(&outcome.steps);
            println!();
            println!("{}", "✓ Site is live".green().bold());
            if let Some(domain) = &outcome.site.live_domain {
                println!("  url: {}", format!("https://{domain}").cyan());
            }
        }
        Err(e) => {
            utils::print_failure(&e);
            std::process::exit(1);
        }
    }

    Ok(())
}
