//! The collection loop: fetch, classify, persist, tick.
//!
//! One cycle fetches a batch of recent records, classifies each roll,
//! and writes through the store's idempotent insert. Cycles run
//! sequentially on one task, so there is never more than one in-flight
//! write cycle and no overlap prevention is needed. The loop runs until
//! the shutdown signal fires.

use catalogo_core::CIVIL_TZ;
use catalogo_db::{InsertOutcome, PostgresPool, ResultStore};
use catalogo_types::classify;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::config::CollectorConfig;
use crate::feed::{parse_feed_timestamp, FeedClient, FeedRecord};

/// Run the collection loop until `shutdown` fires.
///
/// Each tick fetches one batch and persists it. A fetch failure is
/// logged and the cycle skipped; per-record problems are logged and the
/// record skipped. The interval is fixed (no drift compensation): a
/// slow cycle only delays its own successor.
pub async fn run_collector(
    pool: PostgresPool,
    config: CollectorConfig,
    mut shutdown: watch::Receiver<bool>,
) {
    let client = FeedClient::new(&config);
    let mut ticker = tokio::time::interval(config.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        feed_url = config.feed_url,
        interval_secs = config.poll_interval.as_secs(),
        "Collector loop starting"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match client.fetch_recent().await {
                    Ok(records) => persist_batch(&pool, &records).await,
                    Err(e) => warn!(error = %e, "feed fetch failed, skipping cycle"),
                }
            }
            _ = shutdown.changed() => {
                info!("Collector shutdown signal received");
                break;
            }
        }
    }
}

/// Persist one fetched batch through the dedup-on-write insert.
///
/// Errors are isolated per record: a storage fault loses at most the
/// record it hit and never aborts the batch or the loop.
async fn persist_batch(pool: &PostgresPool, records: &[FeedRecord]) {
    let store = ResultStore::new(pool.pool());
    let mut inserted = 0usize;
    let mut duplicates = 0usize;
    let mut skipped = 0usize;

    for record in records {
        let (Some(roll), Some(created_at)) = (record.roll, record.created_at.as_deref()) else {
            warn!(?record, "incomplete feed record skipped");
            skipped += 1;
            continue;
        };

        let Some(occurred_at) = parse_feed_timestamp(created_at) else {
            warn!(created_at, "unparseable feed timestamp skipped");
            skipped += 1;
            continue;
        };

        let color = classify(roll);
        match store.insert_if_absent(roll, color, occurred_at).await {
            Ok(InsertOutcome::Inserted(id)) => {
                inserted += 1;
                info!(
                    id,
                    roll,
                    %color,
                    occurred_at = %occurred_at.with_timezone(&CIVIL_TZ),
                    "round recorded"
                );
            }
            Ok(InsertOutcome::Duplicate) => duplicates += 1,
            Err(e) => {
                // The record is lost for this cycle; the overlap of the
                // next fetch will retry it if the feed still carries it.
                error!(error = %e, roll, "failed to persist round");
            }
        }
    }

    debug!(
        inserted,
        duplicates,
        skipped,
        batch_size = records.len(),
        "collection cycle finished"
    );
}
