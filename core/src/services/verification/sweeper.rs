//! Periodic removal of expired verification codes
//!
//! Verify already deletes expired entries lazily; the sweeper reclaims the
//! ones nobody came back for.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use jt_shared::config::OtpConfig;

use crate::errors::DomainResult;
use crate::repositories::VerificationStore;

#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to sweep (0 disables the background task)
    pub interval_seconds: u64,
    /// How long an expired entry is kept before removal
    pub retention_seconds: i64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300,
            retention_seconds: 3600,
        }
    }
}

impl From<&OtpConfig> for SweeperConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            interval_seconds: config.sweep_interval_seconds,
            retention_seconds: config.expired_retention_seconds,
        }
    }
}

pub struct ExpiredCodeSweeper<S: VerificationStore + ?Sized + 'static> {
    store: Arc<S>,
    config: SweeperConfig,
}

impl<S: VerificationStore + ?Sized + 'static> ExpiredCodeSweeper<S> {
    pub fn new(store: Arc<S>, config: SweeperConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep; returns how many entries were removed
    pub async fn run_once(&self) -> DomainResult<u64> {
        let now = Utc::now();
        let cutoff = Duration::try_seconds(self.config.retention_seconds.max(0))
            .and_then(|retention| now.checked_sub_signed(retention))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let purged = self.store.purge_expired(cutoff).await?;
        if purged > 0 {
            info!(purged = purged, event = "otp_sweep", "Removed expired verification codes");
        }
        Ok(purged)
    }

    /// Spawn the sweep loop on the tokio runtime
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if self.config.interval_seconds == 0 {
            warn!("Expired code sweeper is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Expired code sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_once().await {
                    error!(error = %e, "Expired code sweep failed");
                }
            }
        }))
    }
}
