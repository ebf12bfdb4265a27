use std::time::Duration;

use async_trait::async_trait;

/// All human-mimicking waits go through this seam so tests can observe
/// pacing without sleeping.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn wait(&self, duration: Duration);
}

pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
