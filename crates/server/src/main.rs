mod api;
mod config;
mod db;
mod entity;
mod repository;
mod service;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use algoarena_core::ValidationEngine;
use anyhow::Context;
use judge_client::Judge0Client;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::AppState;
use config::ServerConfig;
use repository::{
    SeaOrmProblemRepository, SeaOrmSubmissionRepository, SeaOrmUserRepository,
    SeaOrmVideoRepository,
};
use service::{ProblemService, SubmissionQueries};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting algoarena server");
    let config = ServerConfig::load().context("failed to load server config")?;

    let db = db::init_pool_and_migrate()
        .await
        .context("failed to initialize database")?;

    let judge = Judge0Client::new(&config.judge).context("failed to build judge client")?;
    info!(base_url = %config.judge.base_url, "judge client ready");
    let validation =
        ValidationEngine::new(Arc::new(judge)).with_mode(config.validation.mode());

    let problems = Arc::new(SeaOrmProblemRepository::new(db.clone()));
    let users = Arc::new(SeaOrmUserRepository::new(db.clone()));
    let state = AppState::new(
        ProblemService::new(
            problems.clone(),
            users.clone(),
            Arc::new(SeaOrmVideoRepository::new(db.clone())),
            validation,
        ),
        SubmissionQueries::new(
            problems,
            Arc::new(SeaOrmSubmissionRepository::new(db)),
            users,
        ),
    );

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;
    info!(address = %config.bind_address, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, api::create_router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received, stopping server");
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
