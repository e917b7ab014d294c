//! Background maintenance tasks.

use std::sync::Arc;
use std::time::Duration;

use crate::main_lib::AppState;

const SHARE_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Periodically removes expired trip shares. Expired links already fail to
/// resolve; this keeps the table from accumulating dead rows.
pub fn start_share_purge_scheduler(state: Arc<AppState>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SHARE_PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            match state.share_service.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => tracing::info!("Purged {} expired trip shares", purged),
                Err(e) => tracing::warn!("Share purge failed: {}", e),
            }
        }
    });
}
