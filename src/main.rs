use anyhow::{Context, Result};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use vidroll::config::{self, Config, LogFormat};
use vidroll::routes;

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(env_filter).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv()?;
    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(config.log_format);
    tracing::info!("Starting vidroll v{}", env!("CARGO_PKG_VERSION"));

    let state = vidroll::init(&config).await.inspect_err(|e| {
        tracing::error!("startup failed: {:#}", e);
    })?;

    let app = routes::app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
