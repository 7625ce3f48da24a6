use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use cricket_scorer::store::{SnapshotStore, SqliteStore};
use cricket_scorer::types::BallSignal;
use cricket_scorer::{config, scorer, server, signal, state};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.parse().unwrap_or_default()),
        )
        .with_target(false)
        .init();

    let port = config.http_port;

    tracing::info!(
        team_a = %config.team_a_name,
        team_b = %config.team_b_name,
        overs = config.overs_limit,
        autosave = config.autosave,
        port,
        "cricket-scorer starting"
    );

    let store: Option<Box<dyn SnapshotStore>> = match SqliteStore::open(&config.db_path) {
        Ok(store) => Some(Box::new(store)),
        Err(e) => {
            tracing::warn!(error = %e, "snapshot store unavailable — save/load disabled");
            None
        }
    };
    let stdin_signals = config.stdin_signals;
    let app_state = state::AppState::new(config, store);

    if let Some(store) = &app_state.store {
        match store.load(cricket_scorer::store::IN_PROGRESS_KEY) {
            Ok(Some(_)) => tracing::info!("saved match found — POST /api/load to resume"),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "could not read saved match"),
        }
    }

    let cancel = CancellationToken::new();

    if stdin_signals {
        let (signal_tx, signal_rx) = mpsc::channel::<BallSignal>(64);
        tokio::spawn(signal::run_stdin(signal_tx));
        tokio::spawn(scorer::run(signal_rx, app_state.clone(), cancel.clone()));
    }

    let router = server::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!("HTTP server listening on 0.0.0.0:{port}");

    let shutdown = cancel.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown requested");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
