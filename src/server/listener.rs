use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::server::dispatcher::RequestDispatcher;

/// Binds the configured address and serves until the task is dropped.
///
/// A bad root or a failed bind is returned; nothing after that is.
pub async fn run(cfg: &ServerConfig) -> anyhow::Result<()> {
    let root = cfg.canonical_root()?;
    let addr = cfg.listen_addr()?;

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        addr = %listener.local_addr()?,
        root = %root.display(),
        "Serving files"
    );

    let dispatcher = Arc::new(RequestDispatcher::new(root, cfg.max_request_bytes));
    serve(listener, dispatcher).await
}

/// Accept loop. Each connection gets its own task and exactly one response.
pub async fn serve(listener: TcpListener, dispatcher: Arc<RequestDispatcher>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "Accept failed");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            if let Err(e) = dispatcher.serve(socket).await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
