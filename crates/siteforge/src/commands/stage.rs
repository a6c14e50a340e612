use crate::utils;
use colored::Colorize;

pub async fn handle(site_id: &str) -> anyhow::Result<()> {
    println!("{}", "Publishing to staging...".blue());

    let provisioner = utils::provisioner()?;
    match provisioner.publish_to_staging(site_id).await {
        Ok(outcome) => {
            utils::print_steps(&outcome.steps);
            println!();
            println!("{}", "✓ Site staged".green().bold());
            println!(
                "  preview: {}",
                format!("https://{}", outcome.site.staging_domain).cyan()
            );
        }
        Err(e) => {
            utils::print_failure(&e);
            std::process::exit(1);
        }
    }

    Ok(())
}
