use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info, Level};

use shopbooks_backend::domain::session_lock::{SessionLockService, IDLE_POLL_SECONDS};
use shopbooks_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let username = std::env::var("SHOPBOOKS_USER").unwrap_or_else(|_| "owner".to_string());
    let data_directory = std::env::var("SHOPBOOKS_DATA").ok().map(PathBuf::from);

    let app_state = initialize_backend(data_directory, &username).await?;

    // Idle-lock poll: every 10 seconds, re-lock after 5 idle minutes. The
    // same tick commits staged deletes whose grace window has elapsed, as a
    // backstop behind the per-delete commit tasks.
    let session_lock = app_state.session_lock.clone();
    let transaction_service = app_state.transaction_service.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(IDLE_POLL_SECONDS));
        loop {
            interval.tick().await;
            match SessionLockService::epoch_millis() {
                Ok(now) => {
                    session_lock.poll_idle(now);
                    if let Err(e) = transaction_service.commit_due_deletes(now).await {
                        error!("Failed to commit staged deletes: {}", e);
                    }
                }
                Err(e) => error!("Clock error in idle poll: {}", e),
            }
        }
    });

    let router = create_router(app_state);
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Shop Books backend listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
