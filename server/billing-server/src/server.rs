use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Instant;

use billing_service::BillingService;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Shared handler state
///
/// Reads take the read lock; mutations take the write lock for the duration
/// of a single service call.
#[derive(Clone)]
pub struct BillingServer {
    pub service: Arc<RwLock<BillingService>>,
    pub started_at: Instant,
}

impl BillingServer {
    pub fn new(service: BillingService) -> Self {
        Self {
            service: Arc::new(RwLock::new(service)),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Resolve once `signal` reports a shutdown request.
///
/// If the signal listener itself fails the error is logged and this never
/// resolves, so the server keeps running instead of stopping at once.
pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_resolves_on_signal() {
        let waited = tokio::time::timeout(Duration::from_millis(100), wait_for_shutdown(async { Ok(()) })).await;
        assert!(waited.is_ok());
    }

    #[tokio::test]
    async fn test_failed_signal_listener_keeps_serving() {
        let failing = async { Err(io::Error::other("no signal handler")) };
        let waited = tokio::time::timeout(Duration::from_millis(100), wait_for_shutdown(failing)).await;
        assert!(waited.is_err());
    }
}
