use async_trait::async_trait;
use std::time::Duration;

/// Clock abstraction over the simulated-delay suspension points
///
/// Production uses the tokio timer; tests inject a recording fake so the
/// settlement sequence and processor delays run without real waiting.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by the tokio timer
#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Clock for SystemClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
