use anyhow::Context;
use canteen_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. environment (.env is optional)
    dotenv::dotenv().ok();

    // 2. configuration + work directory, so the log directory exists
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .ensure_work_dir_structure()
        .context("Failed to create work directory")?;

    // 3. logging
    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        Some(&config.log_dir()),
    );

    print_banner();
    tracing::info!(
        work_dir = %config.work_dir,
        port = config.http_port,
        environment = %config.environment,
        timezone = %config.timezone,
        "Canteen server starting..."
    );
    if config.is_development() {
        tracing::warn!("Development mode: do not expose this instance publicly");
    }
    if config.upi_id.is_none() {
        tracing::warn!("UPI_ID is not set, payment QR codes are disabled");
    }

    // 4. state (database, migrations, seed data)
    let state = ServerState::initialize(&config)
        .await
        .context("Failed to initialize server state")?;

    // 5. serve until Ctrl-C
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
