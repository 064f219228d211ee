//! Background worker persisting click events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Drains click events from the channel and records them in the backing
/// store.
///
/// Each event triggers one [`UrlRepository::record_click`] call, which the
/// store applies as an atomic counter increment plus last-access stamp.
/// Failures are logged and swallowed: a click lost to a store fault or a
/// just-deleted record must never surface on the redirect path.
///
/// The worker exits when every sender handle has been dropped.
pub async fn run_click_worker<R>(mut rx: mpsc::Receiver<ClickEvent>, repository: Arc<R>)
where
    R: UrlRepository + ?Sized,
{
    while let Some(event) = rx.recv().await {
        match repository.record_click(&event.code).await {
            Ok(record) => {
                debug!(code = %event.code, clicks = record.click_count, "click recorded");
            }
            Err(AppError::NotFound { .. }) => {
                // The record was deleted between redirect and processing.
                debug!(code = %event.code, "dropping click for missing record");
            }
            Err(e) => {
                warn!(code = %event.code, error = %e, "failed to record click");
            }
        }
    }

    debug!("click worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlRecord;
    use crate::domain::repositories::MockUrlRepository;

    #[tokio::test]
    async fn test_worker_records_each_event() {
        let mut repo = MockUrlRepository::new();
        repo.expect_record_click()
            .times(3)
            .returning(|code| Ok(UrlRecord::new(1, code, "https://example.com")));

        let (tx, rx) = mpsc::channel(16);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(repo)));

        for _ in 0..3 {
            tx.send(ClickEvent::new("abc123")).await.unwrap();
        }
        drop(tx);

        // Mock expectations are checked on drop when the worker finishes.
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_survives_missing_record() {
        let mut repo = MockUrlRepository::new();
        repo.expect_record_click()
            .withf(|code| code == "gone")
            .times(1)
            .returning(|code| Err(AppError::not_found(code)));
        repo.expect_record_click()
            .withf(|code| code == "alive")
            .times(1)
            .returning(|code| Ok(UrlRecord::new(2, code, "https://example.com")));

        let (tx, rx) = mpsc::channel(16);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(repo)));

        tx.send(ClickEvent::new("gone")).await.unwrap();
        tx.send(ClickEvent::new("alive")).await.unwrap();
        drop(tx);

        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_survives_store_fault() {
        let mut repo = MockUrlRepository::new();
        repo.expect_record_click()
            .times(2)
            .returning(|_| Err(AppError::backing_store(anyhow::anyhow!("connection reset"))));

        let (tx, rx) = mpsc::channel(16);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(repo)));

        tx.send(ClickEvent::new("abc123")).await.unwrap();
        tx.send(ClickEvent::new("abc123")).await.unwrap();
        drop(tx);

        worker.await.unwrap();
    }
}
