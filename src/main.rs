use clap::Parser;
use poem::{listener::TcpListener, Server};

use versoforms_backend::api::build_routes;
use versoforms_backend::app_data::AppData;
use versoforms_backend::cli::{self, Cli, Commands};
use versoforms_backend::config::{
    init_database, init_logging, migrate_database, BootstrapSettings, SecretManager,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();
    let settings = BootstrapSettings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", settings);

    let command = cli.command.unwrap_or(Commands::Serve);

    if command == Commands::Migrate {
        return cli::migrate::run_migrations(&settings).await;
    }

    let secrets = SecretManager::init()?;
    tracing::info!("{}", secrets);

    let db = init_database(&settings).await?;
    migrate_database(&db).await?;

    let app_data = AppData::init(settings, &secrets, db)?;

    match command {
        Commands::Serve => serve(&app_data).await?,
        other => cli::execute_command(other, &app_data).await?,
    }

    Ok(())
}

async fn serve(app_data: &AppData) -> Result<(), std::io::Error> {
    let settings = &app_data.settings;

    std::fs::create_dir_all(settings.storage_root())?;

    let app = build_routes(app_data);
    let address = settings.server_address();

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at {}/swagger", settings.public_base_url());
    tracing::info!("API endpoints available at {}/api", settings.public_base_url());

    Server::new(TcpListener::bind(address)).run(app).await
}
