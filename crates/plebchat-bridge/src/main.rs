//! Process bootstrap: configuration, adapters, gateway task, HTTP server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use reqwest::Client;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use plebchat_bridge::config::Config;
use plebchat_bridge::relay::{InboundRelay, OutboundRelay};
use plebchat_bridge::server::{AppState, HealthState, build_app};
use plebchat_bridge::store::FirebaseStore;
use plebchat_bridge::webhook::{DiscordWebhook, OutboundDelivery};
use plebchat_gateway_discord::{ConnectionStatus, DiscordConfig, DiscordGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    // One HTTP client shared by both delivery adapters; its timeout
    // bounds every downstream call.
    let client = Client::builder()
        .timeout(Duration::from_secs(config.server.request_timeout_seconds))
        .build()
        .context("failed to build HTTP client")?;

    let delivery = config.webhook.as_ref().map(|webhook| {
        Arc::new(DiscordWebhook::new(client.clone(), webhook.url.clone()))
            as Arc<dyn OutboundDelivery>
    });
    if delivery.is_none() {
        warn!("DISCORD_WEBHOOK_URL not set; outbound relay will refuse requests");
    }
    let outbound = Arc::new(OutboundRelay::new(
        delivery,
        config.webhook.as_ref().and_then(|webhook| webhook.avatar_url.clone()),
    ));

    let shutdown = CancellationToken::new();
    let status = ConnectionStatus::default();

    let gateway_task = match (&config.gateway, &config.store) {
        (Some(gateway), Some(store)) => {
            let store = Arc::new(FirebaseStore::new(
                client.clone(),
                store.database_url.clone(),
                store.auth_token.clone(),
            ));
            let inbound = Arc::new(InboundRelay::new(gateway.channel_id, store));
            let discord = DiscordGateway::new(
                DiscordConfig {
                    token: gateway.token.clone(),
                },
                status.clone(),
            );
            let token = shutdown.clone();
            Some(tokio::spawn(async move {
                if let Err(e) = discord.run(inbound, token).await {
                    error!("Discord gateway exited: {e:#}");
                }
            }))
        }
        _ => {
            warn!("Discord bot token, channel id, or store URL not set; inbound relay disabled");
            None
        }
    };

    let state = AppState {
        outbound,
        health: HealthState::new(status),
    };
    let app = build_app(state, config.server.request_timeout_seconds);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server running on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Shutting down gracefully");
    shutdown.cancel();
    if let Some(task) = gateway_task {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, task).await.is_err() {
            warn!(
                "Discord gateway did not stop within {}s; abandoning",
                config.server.shutdown_grace_seconds
            );
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
