pub mod config;
pub mod constants;
pub mod domain;
pub mod models;
pub mod routes;
pub mod services;

use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use config::Config;
use domain::urls::{PgUrlStore, UrlStore};
use services::import::UrlImporter;
use services::tikwm::{TikwmClient, VideoInfoSource};

/// Shared handler state; every collaborator is injected at construction.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UrlStore>,
    pub videos: Arc<dyn VideoInfoSource>,
    pub importer: Option<UrlImporter>,
}

/// Connect to Postgres and make sure the schema exists.
pub async fn connect_database(config: &Config) -> anyhow::Result<PgPool> {
    let options = config.database.connect_options()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(options)
        .await
        .context("Unable to connect to the database")?;

    tracing::info!("connected to the database");

    domain::urls::init_schema(&pool)
        .await
        .context("Error setting up database schema")?;

    tracing::info!("database schema set up");
    Ok(pool)
}

/// Build the application state from config. Fails instead of aborting so
/// callers decide how to exit.
pub async fn init(config: &Config) -> anyhow::Result<AppState> {
    let pool = connect_database(config).await?;

    let videos = TikwmClient::new(&config.video_api.base_url, config.video_api.timeout)
        .context("Failed to build video-info HTTP client")?;

    let importer = config
        .import_list_url
        .as_deref()
        .map(|source| UrlImporter::new(source, config.video_api.timeout))
        .transpose()
        .context("Failed to build URL import HTTP client")?;

    Ok(AppState {
        store: Arc::new(PgUrlStore::new(pool)),
        videos: Arc::new(videos),
        importer,
    })
}
