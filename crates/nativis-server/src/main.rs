mod api;
mod middleware;

use std::net::SocketAddr;
use std::sync::Arc;

use nativis_locator::{load_brand_logos, HttpLogoSource, IconCache};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = nativis_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let directory = Arc::new(nativis_core::load_directory(&config.directory_path)?);
    tracing::info!(
        env = %config.env,
        path = %config.directory_path.display(),
        locations = directory.len(),
        brands = directory.brands().len(),
        "partner directory loaded"
    );

    let icons = prime_icons(&config, &directory).await;

    let state = AppState {
        directory,
        icons: Arc::new(icons),
        contact_email: Arc::from(config.contact_email.as_str()),
    };
    let app = build_app(state, rate_limit_state(config.rate_limit_per_minute));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}

/// Build marker icons, swapping in every logo that loads. Logo failures only
/// cost that brand its logo.
async fn prime_icons(
    config: &nativis_core::AppConfig,
    directory: &nativis_core::Directory,
) -> IconCache {
    let mut icons = IconCache::new(directory.brands());

    let source = match HttpLogoSource::new(
        &config.asset_base_url,
        config.asset_timeout_secs,
        &config.user_agent,
    ) {
        Ok(source) => source,
        Err(error) => {
            tracing::warn!(error = %error, "logo source unavailable; all markers use letter glyphs");
            return icons;
        }
    };

    let mut loaded = 0_usize;
    for (brand, outcome) in load_brand_logos(&source, directory.brands()).await {
        if icons.record_logo(&brand, outcome) {
            loaded += 1;
        }
    }
    tracing::info!(loaded, total = directory.brands().len(), "brand logos primed");
    icons
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(error = %error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
