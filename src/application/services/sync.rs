//! Batch market-data sync
//!
//! Works through pending sync-queue rows one at a time: fetch the quote from
//! the row's provider, upsert the snapshot, mark the row completed or failed.
//! A fixed politeness delay separates provider calls. Best effort throughout:
//! one bad row never aborts the batch, and a provider that keeps failing is
//! skipped for the rest of the run.

use crate::config::Config;
use crate::constants::MAX_CONSECUTIVE_ERRORS;
use crate::error::AppResult;
use crate::model::market::Provider;
use crate::model::sync::{SyncJob, SyncStatus};
use crate::storage::inventory_store::InventoryStore;
use crate::storage::market_store::MarketStore;
use crate::storage::sync_store::SyncStore;
use crate::transport::MarketDataProvider;
use crate::utils::sku::normalize_sku_for_matching;
use chrono::Utc;
use nanoid::nanoid;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Outcome counts for one sync run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Rows that completed successfully
    pub completed: usize,
    /// Rows that failed
    pub failed: usize,
    /// Rows skipped because their provider was cooling down
    pub skipped: usize,
}

/// Drives market-data refresh through the sync queue
pub struct SyncService {
    providers: Vec<Arc<dyn MarketDataProvider>>,
    inventory: InventoryStore,
    market: MarketStore,
    queue: SyncStore,
    batch_delay: Duration,
}

impl SyncService {
    /// Creates a new sync service over the given pricing providers
    pub fn new(
        config: &Config,
        providers: Vec<Arc<dyn MarketDataProvider>>,
        inventory: InventoryStore,
        market: MarketStore,
        queue: SyncStore,
    ) -> Self {
        Self {
            providers,
            inventory,
            market,
            queue,
            batch_delay: Duration::from_millis(config.sync.batch_delay_ms),
        }
    }

    /// Enqueues a refresh job for every (item, provider) pair
    ///
    /// Pairs that already have a pending row are not re-enqueued and do not
    /// count towards the returned total.
    pub async fn enqueue_items(&self, inventory_ids: &[String]) -> AppResult<usize> {
        let mut enqueued: usize = 0;

        for inventory_id in inventory_ids {
            for provider in &self.providers {
                let now = Utc::now();
                let job = SyncJob {
                    id: nanoid!(21),
                    inventory_id: inventory_id.clone(),
                    provider: provider.provider(),
                    status: SyncStatus::Pending,
                    attempts: 0,
                    last_error: None,
                    created_at: now,
                    updated_at: now,
                };
                enqueued += self.queue.enqueue(&job).await? as usize;
            }
        }

        info!("Enqueued {} sync jobs", enqueued);
        Ok(enqueued)
    }

    /// Processes up to `limit` pending jobs
    pub async fn run_pending(&self, limit: i64) -> AppResult<SyncOutcome> {
        let jobs = self.queue.list_pending(limit).await?;
        info!("Processing {} pending sync jobs", jobs.len());

        let mut outcome = SyncOutcome::default();
        let mut consecutive_errors: HashMap<Provider, u32> = HashMap::new();

        for (i, job) in jobs.iter().enumerate() {
            let provider_errors = consecutive_errors.get(&job.provider).copied().unwrap_or(0);
            if provider_errors >= MAX_CONSECUTIVE_ERRORS {
                outcome.skipped += 1;
                continue;
            }

            self.queue
                .update_status(&job.id, SyncStatus::Running, None)
                .await?;

            match self.process_job(job).await {
                Ok(()) => {
                    self.queue
                        .update_status(&job.id, SyncStatus::Completed, None)
                        .await?;
                    consecutive_errors.insert(job.provider, 0);
                    outcome.completed += 1;
                }
                Err(e) => {
                    let msg = e.to_string();
                    warn!("Sync job {} failed: {}", job.id, msg);
                    self.queue
                        .update_status(&job.id, SyncStatus::Failed, Some(&msg))
                        .await?;
                    let errors = consecutive_errors.entry(job.provider).or_insert(0);
                    *errors += 1;
                    if *errors >= MAX_CONSECUTIVE_ERRORS {
                        warn!(
                            "Provider {} failed {} times in a row, skipping for this run",
                            job.provider, errors
                        );
                    }
                    outcome.failed += 1;
                }
            }

            if i + 1 < jobs.len() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        info!(
            "Sync run finished: {} completed, {} failed, {} skipped",
            outcome.completed, outcome.failed, outcome.skipped
        );
        Ok(outcome)
    }

    async fn process_job(&self, job: &SyncJob) -> AppResult<()> {
        let item = self
            .inventory
            .get_item(&job.inventory_id)
            .await?
            .ok_or_else(|| {
                crate::error::AppError::NotFound(format!("inventory item {}", job.inventory_id))
            })?;

        let sku = normalize_sku_for_matching(&item.sku).unwrap_or_else(|| item.sku.clone());

        let provider = self
            .providers
            .iter()
            .find(|p| p.provider() == job.provider)
            .ok_or_else(|| {
                crate::error::AppError::Config(format!("no client for provider {}", job.provider))
            })?;

        match provider.fetch_quote(&sku).await? {
            Some(mut quote) => {
                // Snapshots are keyed on the canonical SKU so all providers
                // land on the same row key.
                quote.sku = sku;
                self.market.upsert_snapshot(&quote).await?;
                Ok(())
            }
            None => {
                // No listing is a valid result, not a failure.
                info!("{} has no listing for {}", job.provider, sku);
                Ok(())
            }
        }
    }
}
