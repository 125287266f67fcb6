//! Scan statistics.

use crate::error::Result;
use crate::state::store::JsonStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Aggregate counters across scans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Total scans performed.
    pub scans_performed: u64,

    /// Total issues reported across all scans.
    pub issues_found: u64,

    /// Timestamp of the most recent scan.
    pub last_scan: Option<DateTime<Utc>>,

    /// Timestamp of the first recorded scan.
    pub first_activity: Option<DateTime<Utc>>,
}

/// Persists [`ScanStats`] under the data directory.
pub struct StatsTracker {
    store: JsonStore,
}

impl StatsTracker {
    /// Open the stats file under the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            store: JsonStore::new(data_dir.join("stats.json")),
        }
    }

    /// Current stats, zeroed when nothing has been recorded yet.
    pub fn load(&self) -> Result<ScanStats> {
        Ok(self.store.load()?.unwrap_or_default())
    }

    /// Record one finished scan and return the updated stats.
    pub fn record_scan(&self, issues_found: u64) -> Result<ScanStats> {
        let mut stats = self.load()?;
        let now = Utc::now();

        stats.scans_performed += 1;
        stats.issues_found += issues_found;
        stats.last_scan = Some(now);
        if stats.first_activity.is_none() {
            stats.first_activity = Some(now);
        }

        self.store.save(&stats)?;
        Ok(stats)
    }
}
