use auth::RevocationList;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

/// Periodically drop revoked tokens that have expired on their own.
pub fn spawn(revocations: Arc<RevocationList>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = revocations.purge_expired(Utc::now().timestamp());
            if removed > 0 {
                tracing::debug!(
                    removed,
                    remaining = revocations.len(),
                    "Swept expired revocations"
                );
            }
        }
    })
}
