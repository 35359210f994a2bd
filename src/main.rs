//! progress-sync binary entrypoint wiring the REST surface, the remote store and the local snapshot.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use progress_sync::{
    config::AppConfig,
    dao::{
        local_store::{FallbackStore, FileLocalStore},
        progress_store::{
            ProgressStore,
            postgrest::{PostgrestConfig, PostgrestStore, SupabaseSession},
        },
    },
    routes,
    services::{
        activity_service::ActivityNotifier, leaderboard_service::LeaderboardService,
        persistence_service::PersistenceCoordinator,
    },
    session::{AccessToken, SessionProvider},
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let remote_config = PostgrestConfig::from_env().context("reading remote store settings")?;

    let app_state = build_state(&config, remote_config)?;
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!(%addr, fallback_dir = %config.fallback_dir.display(), "starting progress sync daemon");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Wire the remote store, session resolver and local snapshot into the shared state.
fn build_state(config: &AppConfig, remote_config: PostgrestConfig) -> anyhow::Result<SharedState> {
    let token = AccessToken::new();
    let session: Arc<dyn SessionProvider> = Arc::new(
        SupabaseSession::new(&remote_config, token.clone()).context("building session client")?,
    );
    let remote: Arc<dyn ProgressStore> = Arc::new(
        PostgrestStore::new(remote_config, token.clone()).context("building remote store client")?,
    );
    let fallback = FallbackStore::new(
        Arc::new(FileLocalStore::new(&config.fallback_dir)),
        config.save_key.as_str(),
    );

    let coordinator = PersistenceCoordinator::new(session.clone(), remote.clone(), fallback)
        .with_save_serialization(config.serialize_saves);
    let notifier = ActivityNotifier::new(session, remote.clone());
    let leaderboard = LeaderboardService::new(remote.clone(), config.leaderboard_limit);

    Ok(AppState::new(coordinator, notifier, leaderboard, remote, token))
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
