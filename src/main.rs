use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod db;
mod error;
mod middleware;
mod routes;
mod state;
mod views;

#[cfg(test)]
mod integration_tests;

use config::AppConfig;
use error::AgriResult;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AgriRecord...");

    let pool = match db::init_pool(&config.database_url).await {
        Ok(pool) => {
            tracing::info!("Database connection established");
            if let Err(e) = db::init_database(&pool).await {
                tracing::error!("Failed to run migrations: {}", e);
                return;
            }
            pool
        }
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            return;
        }
    };

    if let Err(e) = serve(AppState::new(pool, config)).await {
        tracing::error!("Server error: {}", e);
    }
}

async fn serve(state: AppState) -> AgriResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = routes::create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
