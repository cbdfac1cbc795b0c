use anyhow::Context;
use passify_pdf_api::{app_with_config, ApiConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passify_pdf_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    let bind = config.bind;
    if let Some(dir) = &config.staging_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create staging directory {}", dir.display()))?;
    }

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("cannot listen on {bind}"))?;

    info!("passifypdf form listening on http://{bind}");

    axum::serve(listener, app_with_config(config)).await?;
    Ok(())
}
