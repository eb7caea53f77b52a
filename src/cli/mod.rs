// CLI module for operations requiring server access

pub mod migrate;
pub mod setup_admin;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// VersoForms submission backend
#[derive(Parser)]
#[command(name = "versoforms")]
#[command(about = "VersoForms submission backend", long_about = None)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Run pending database migrations and exit
    Migrate,

    /// Create an admin account, or grant the admin role to an existing one
    SetupAdmin {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password; a random one is generated and printed when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

/// Execute an administrative CLI command
///
/// `serve` and `migrate` are handled by main.rs before AppData exists.
pub async fn execute_command(command: Commands, app_data: &AppData) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::SetupAdmin { email, password } => {
            setup_admin::setup_admin(&app_data.setup_coordinator, &email, password).await?;
        }
        Commands::Serve | Commands::Migrate => {
            tracing::debug!("{:?} is handled by main", command);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["versoforms"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_parse_setup_admin() {
        let cli = Cli::try_parse_from([
            "versoforms",
            "setup-admin",
            "--email",
            "admin@example.com",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::SetupAdmin {
                email: "admin@example.com".to_string(),
                password: None,
            })
        );
    }

    #[test]
    fn test_setup_admin_requires_email() {
        assert!(Cli::try_parse_from(["versoforms", "setup-admin"]).is_err());
    }
}
