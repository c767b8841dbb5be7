mod api;
mod middleware;

use std::{sync::Arc, time::Duration};

use drivethru_locator::{LocatorConfig, RoutePipeline};
use drivethru_maps::MapsClient;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState, ClientSettings},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = drivethru_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!(?config, "configuration loaded");

    let client = MapsClient::with_base_url(
        &config.maps_api_key,
        config.maps_timeout_secs,
        &config.maps_base_url,
        &config.user_agent,
    )?;
    let pipeline = RoutePipeline::new(client, LocatorConfig::from_app_config(&config));

    let state = AppState {
        pipeline: Arc::new(pipeline),
        client: Arc::new(ClientSettings::from_app_config(&config)),
    };
    let rate_limit = RateLimitState::new(
        config.rate_limit_per_minute.max(1),
        Duration::from_secs(60),
    );
    let app = build_app(state, rate_limit);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
