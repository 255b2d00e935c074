//! Fetch orchestration: runs every adapter with a bounded retry loop and
//! assembles per-weekday snapshots.
//!
//! One failing restaurant never takes the batch down. Transport errors are
//! retried with a short linear backoff; a fetch that succeeds but yields no
//! menus is a structural miss and is *not* retried, because the document
//! will not change between attempts.

use std::time::Duration;

use crate::model::{DayRecord, Weekday};
use crate::scrapers::LunchScraper;
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::tags::{self, TagTable};

/// Retry behavior for a single source.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> RetryPolicy {
        RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Delay before re-attempting: base plus one second per attempt already
    /// made (2s, 3s, ...).
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay + Duration::from_secs(u64::from(attempt))
    }
}

struct PoolEntry {
    scraper: Box<dyn LunchScraper>,
    fetched: bool,
}

/// Owns the adapter set for one run. Each adapter fetches the whole week at
/// most once per pool lifetime; asking for several days reuses the parsed
/// menus instead of re-hitting the sites.
pub struct ScraperPool {
    entries: Vec<PoolEntry>,
    policy: RetryPolicy,
}

impl ScraperPool {
    pub fn new(scrapers: Vec<Box<dyn LunchScraper>>, policy: RetryPolicy) -> ScraperPool {
        ScraperPool {
            entries: scrapers
                .into_iter()
                .map(|scraper| PoolEntry { scraper, fetched: false })
                .collect(),
            policy,
        }
    }

    /// Fetches every adapter that has not yet produced data, then assembles
    /// the snapshot for `day` in registry order. Adapters without a menu for
    /// that day are left out of the snapshot entirely.
    pub async fn collect_day(&mut self, day: Weekday) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for entry in &mut self.entries {
            if !entry.fetched {
                entry.fetched = fetch_with_retry(entry.scraper.as_mut(), &self.policy).await;
            }
            if let Some(menu) = entry.scraper.menus().get(day) {
                snapshot.insert(entry.scraper.name(), DayRecord::from(menu));
            }
        }
        snapshot
    }
}

/// Runs the retry loop for one adapter. Returns true when the adapter ended
/// up holding at least one day's menu.
async fn fetch_with_retry(scraper: &mut dyn LunchScraper, policy: &RetryPolicy) -> bool {
    let attempts = policy.max_retries + 1;
    for attempt in 0..attempts {
        match scraper.fetch().await {
            Ok(()) => {
                if scraper.menus().is_empty() {
                    tracing::warn!(source = scraper.name(), "fetch produced no menu data");
                    return false;
                }
                tracing::debug!(source = scraper.name(), "fetch ok");
                return true;
            }
            Err(e) => {
                tracing::error!(
                    source = scraper.name(),
                    attempt = attempt + 1,
                    error = %e,
                    "fetch failed"
                );
                if attempt + 1 < attempts {
                    tokio::time::sleep(policy.backoff_delay(attempt)).await;
                }
            }
        }
    }
    tracing::error!(source = scraper.name(), "giving up after {attempts} attempts");
    false
}

/// Produces (or refreshes) the snapshot for one weekday and annotates it.
///
/// With an existing snapshot and `refresh` off, the sources are not touched
/// at all; only the tag annotation is re-applied so edits to the tag table
/// show up without a re-scrape. A run where every source came back empty
/// keeps whatever snapshot is already on disk.
pub async fn scrape_for_day(
    pool: &mut ScraperPool,
    store: &SnapshotStore,
    table: &TagTable,
    day: Weekday,
    refresh: bool,
) -> Result<(), crate::error::StorageError> {
    if store.exists(day) && !refresh {
        tracing::info!(%day, "snapshot already on disk, re-annotating only");
        return tags::annotate_file(&store.path_for(day), table);
    }

    let snapshot = pool.collect_day(day).await;
    if snapshot.is_empty() {
        tracing::warn!(%day, "no source produced data, keeping any existing snapshot");
        return Ok(());
    }

    let path = store.save(day, &snapshot)?;
    tags::annotate_file(&path, table)?;
    tracing::info!(%day, sources = snapshot.len(), path = %path.display(), "snapshot written");
    Ok(())
}
