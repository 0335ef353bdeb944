use color_eyre::eyre::Result;
use dotenv::dotenv;
use planner_api::{config::PlannerConfig, ApiState};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = PlannerConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting planner");

    // Open storage and the current week
    let state = ApiState::from_config(&config).await?;

    // Start API server
    planner_api::start_server(config, state).await?;

    Ok(())
}
