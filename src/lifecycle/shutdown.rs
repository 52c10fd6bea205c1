//! Shutdown coordination.
//!
//! The `/exit` route must not kill the process inline: the response has to
//! reach the client first. It instead trigger()s this channel; the server's
//! graceful-shutdown future observes it, stops accepting, and drains
//! in-flight responses before `run` returns.

use tokio::sync::broadcast;

/// Broadcast-based shutdown trigger shared between the HTTP handlers and
/// the serve loop.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Request termination. Never aborts in-flight responses; the serve
    /// loop drains them after observing the signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
