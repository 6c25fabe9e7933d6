//! Shutdown coordination between the poller and the metrics server.

use tokio::sync::broadcast;

/// Broadcast handle that tells long-running tasks to stop.
///
/// Each task takes its own receiver via [`Shutdown::subscribe`] before the
/// signal is sent; late subscribers miss it.
#[derive(Debug, Clone)]
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

    /// Notify every subscriber. Returns how many were listening.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
