//! Navigation capability
//!
//! The interceptor and the refresher never render anything themselves; they
//! hand an href to whoever owns the UI.

use tokio::sync::mpsc;

pub trait Navigator: Send + Sync {
    fn navigate(&self, href: &str);
}

/// Forwards every navigation to a channel the UI shell drains
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, href: &str) {
        tracing::info!(href, "Navigating");
        if self.tx.send(href.to_string()).is_err() {
            tracing::warn!(href, "Navigation dropped: no receiver");
        }
    }
}
