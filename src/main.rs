use bike_rental_shop::{
    cli::Menu,
    config::{database, shop},
    core::seed,
    errors::Result,
};
use dotenvy::dotenv;
use std::io;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible), kept off stdout so it never
    //    interleaves with the menu tables
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Connect and make sure every table exists
    let database_url = database::get_database_url();
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to {database_url}: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 4. Seed staff and fleet from config.toml when present
    let config_path = shop::config_path();
    match shop::load_optional_config(&config_path)? {
        Some(config) => {
            seed::seed_from_config(&db, &config)
                .await
                .inspect_err(|e| error!("Failed to seed from {}: {e}", config_path.display()))?;
        }
        None => info!("No {} found, skipping seed.", config_path.display()),
    }

    // 5. Run the menu on the terminal
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&db, stdin.lock(), stdout.lock())
        .run(&database_url)
        .await?;

    db.close().await?;
    Ok(())
}
