use std::env;

use payslip_engine::api::{AppState, create_router};
use payslip_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/nl2025";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_dir = env::var("PAYSLIP_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr = env::var("PAYSLIP_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load_or_default(&config_dir);
    let router = create_router(AppState::new(config));

    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, config_dir = %config_dir, "Payslip engine listening");
    axum::serve(listener, router).await
}
