mod commands;
mod utils;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sf")]
#[command(about = "Provision and manage hosted client websites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a site: repository, starter template, hosting project, record
    Create {
        /// Client name; the repository slug is derived from it
        name: String,
        /// Owning client account id
        #[arg(short, long)]
        owner: String,
        /// Contact email for the client
        #[arg(short, long)]
        email: String,
        /// Custom domain the live site will be served on
        #[arg(short, long)]
        domain: Option<String>,
        /// Monthly hosting fee
        #[arg(long, default_value = "0")]
        fee: f64,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Promote a site to the staged preview
    Stage {
        /// Site record id
        site_id: String,
    },
    /// Bind the custom domain and take the site live
    Golive {
        /// Site record id
        site_id: String,
        /// Custom domain (required unless already on the record)
        #[arg(short, long)]
        domain: Option<String>,
    },
    /// Hide a published site from public view
    Unpublish {
        /// Site record id
        site_id: String,
        /// Why the site is being hidden
        #[arg(short, long)]
        reason: String,
    },
    /// Delete a site record, optionally removing external resources
    Delete {
        /// Site record id
        site_id: String,
        /// Also delete the source repository
        #[arg(long)]
        delete_repository: bool,
        /// Also delete the hosting project
        #[arg(long)]
        delete_hosting_project: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List all site records
    List,
    /// Show one site record in full
    Show {
        /// Site record id
        site_id: String,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is for command output.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if matches!(cli.command, Commands::Version) {
        println!("siteforge {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match cli.command {
        Commands::Create {
            name,
            owner,
            email,
            domain,
            fee,
            notes,
        } => {
            commands::create::handle(name, owner, email, domain, fee, notes).await?;
        }
        Commands::Stage { site_id } => {
            commands::stage::handle(&site_id).await?;
        }
        Commands::Golive { site_id, domain } => {
            commands::golive::handle(&site_id, domain).await?;
        }
        Commands::Unpublish { site_id, reason } => {
            commands::unpublish::handle(&site_id, &reason).await?;
        }
        Commands::Delete {
            site_id,
            delete_repository,
            delete_hosting_project,
            yes,
        } => {
            commands::delete::handle(&site_id, delete_repository, delete_hosting_project, yes)
                .await?;
        }
        Commands::List => {
            commands::list::handle().await?;
        }
        Commands::Show { site_id } => {
            commands::show::handle(&site_id).await?;
        }
        Commands::Version => {
            unreachable!("Version is handled before dispatch");
        }
    }

    Ok(())
}
