use moodmuse::{router, AppState, Config, MoodEvent, MoodStore, SnapshotSlot};
use tokio::{fs, sync::broadcast::error::RecvError};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let (store, failure) = MoodStore::load(SnapshotSlot::new(&config.data_path)).await;
    let hydration_warning = failure.map(|err| err.to_string());
    info!(entries = store.len(), path = %config.data_path.display(), "mood store ready");

    let mut events = store.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(MoodEvent::Saved(record)) => {
                    info!(date = %record.date, mood = %record.mood, "mood saved");
                }
                Ok(MoodEvent::Hydrated { entries }) => debug!(entries, "store hydrated"),
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "mood events lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let app = router(AppState::new(store, hydration_warning));
    let addr = config.listen_addr();

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}
