use crate::utils;
use colored::Colorize;

pub async fn handle(site_id: &str, reason: &str) -> anyhow::Result<()> {
    println!("{}", "Unpublishing site...".blue());

    let provisioner = utils::provisioner()?;
    match provisioner.unpublish(site_id, reason).await {
        Ok(outcome) => {
            utils::print_steps(&outcome.steps);
            println!();
            println!("{}", "✓ Site unpublished".green().bold());
            println!(
                "  reason: {}",
                outcome.site.unpublished_reason.as_deref().unwrap_or("").dimmed()
            );
            println!("  The hosting project and domain binding remain in place.");
        }
        Err(e) => {
            utils::print_failure(&e);
            std::process::exit(1);
        }
    }

    Ok(())
}
