//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcasts a single shutdown signal to every subscribed server.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        // no subscribers left means nothing to stop
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve on Ctrl+C or when `shutdown` fires (or its sender is dropped).
pub async fn wait_for_shutdown(mut shutdown: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutdown signal received"),
        _ = shutdown.recv() => tracing::info!("Shutdown triggered"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_releases_waiters() {
        let shutdown = Shutdown::new();
        let waiter = tokio::spawn(wait_for_shutdown(shutdown.subscribe()));
        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish")
            .unwrap();
    }
}
