use crate::config::Config;
use std::sync::Arc;

/// Shared application state handed to the web layer.
///
/// The config is fixed at startup; the broadcast channel fans the shutdown
/// signal out to every component holding a receiver.
pub struct AppState {
    pub config: Config,
    pub shutdown_tx: tokio::sync::broadcast::Sender<()>,
}

impl AppState {
    pub fn new(config: Config) -> (Arc<Self>, tokio::sync::broadcast::Receiver<()>) {
        let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(16);

        let state = Arc::new(Self {
            config,
            shutdown_tx,
        });

        (state, shutdown_rx)
    }

    pub fn shutdown(&self) {
        tracing::info!("Initiating application shutdown");
        let _ = self.shutdown_tx.send(());
    }
}
