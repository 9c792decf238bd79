use std::env;
use std::sync::Arc;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::clock::SystemClock;
use payroll_engine::config::ConfigLoader;
use payroll_engine::store::MemoryStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_dir =
        env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| "./config/default".to_string());
    let bind = env::var("PAYROLL_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let (config, users) = ConfigLoader::load(&config_dir)?.into_parts();
    info!(
        config_dir = %config_dir,
        daily_overtime_cap_millis = config.daily_overtime_cap_millis(),
        days_per_month_prorate = config.days_per_month_prorate(),
        max_working_millis_per_day = config.max_working_millis_per_day(),
        users = users.len(),
        "Configuration loaded"
    );

    let store = MemoryStore::new().with_users(users);
    let state = AppState::new(store, config, Arc::new(SystemClock));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(address = %bind, "Payroll engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}
