use std::sync::Arc;
use anyhow::Context;
use travelingo_api::{app, AppState};
use travelingo_core::{InMemoryInquiryRepository, InquiryRepository};
use travelingo_store::{app_config::Config, DbClient, PostgresInquiryRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travelingo_api=debug,travelingo_core=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Travelingo API on port {}", config.server.port);

    let mut db = None;
    let repo: Arc<dyn InquiryRepository> = match &config.database.url {
        Some(url) => {
            let client = DbClient::new(url, &config.database)
                .await
                .context("Failed to connect to Postgres")?;
            if config.database.run_migrations {
                client.migrate().await.context("Failed to run migrations")?;
            }
            let repo = PostgresInquiryRepository::new(client.pool.clone());
            db = Some(client);
            Arc::new(repo)
        }
        None => {
            tracing::warn!("No database.url configured; inquiries are kept in memory only");
            Arc::new(InMemoryInquiryRepository::new())
        }
    };

    let app = app(AppState::new(repo));

    let addr = config.server.addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = db {
        db.close().await;
    }
    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
