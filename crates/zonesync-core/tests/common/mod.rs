//! Test doubles and common utilities for core contract tests
//!
//! [`MemoryProvider`] is a [`ZoneProvider`] built only from the core
//! pieces: it reconciles against an in-memory zone with the same batch
//! semantics a real provider applies, then recovers its result with the
//! differ. No network, no sessions.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use zonesync_core::{
    ClientConfig, Error, ProviderConfig, ProviderRecord, Record, RecordBatch, Result,
    ZoneProvider, ZoneProviderFactory, attributable, compute_append_batch, compute_delete_batch,
    compute_set_batch, to_provider_records, to_records, touched_by_set,
};

pub const ZONE_TTL: Duration = Duration::from_secs(300);

/// A zone held in memory, updated the way a provider applies a batch
#[derive(Default)]
pub struct MemoryZone {
    records: Mutex<Vec<ProviderRecord>>,
    next_id: AtomicUsize,
    updates: AtomicUsize,
}

impl MemoryZone {
    pub fn with_records(records: Vec<ProviderRecord>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id.parse::<usize>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            records: Mutex::new(records),
            next_id: AtomicUsize::new(next_id),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(&self) -> Vec<ProviderRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Number of batches applied
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    /// Apply a batch and return the full post-update state
    pub fn apply(&self, batch: &[ProviderRecord]) -> RecordBatch {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();

        for entry in batch {
            if entry.marked_for_deletion {
                records.retain(|r| r.id != entry.id);
            } else if let Some(existing) =
                records.iter_mut().find(|r| r.has_id() && r.id == entry.id)
            {
                *existing = entry.clone();
            } else {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                records.push(entry.clone().with_id(id.to_string()));
            }
        }

        records.clone()
    }
}

/// Provider reconciling against a [`MemoryZone`]
pub struct MemoryProvider {
    pub zone: MemoryZone,
}

impl MemoryProvider {
    pub fn new(records: Vec<ProviderRecord>) -> Self {
        Self {
            zone: MemoryZone::with_records(records),
        }
    }

    fn submit(&self, batch: &RecordBatch) -> Option<RecordBatch> {
        if batch.is_empty() {
            return None;
        }
        Some(self.zone.apply(batch))
    }
}

#[async_trait]
impl ZoneProvider for MemoryProvider {
    async fn get_records(&self, _zone: &str) -> Result<Vec<Record>> {
        Ok(to_records(&self.zone.snapshot(), ZONE_TTL))
    }

    async fn append_records(&self, _zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let baseline = self.zone.snapshot();
        let batch = compute_append_batch(&to_provider_records(records), &baseline);
        Ok(match self.submit(&batch) {
            Some(post) => to_records(&attributable(&post, &baseline), ZONE_TTL),
            None => Vec::new(),
        })
    }

    async fn set_records(&self, _zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let baseline = self.zone.snapshot();
        let batch = compute_set_batch(&to_provider_records(records), &baseline);
        Ok(match self.submit(&batch) {
            Some(post) => to_records(&touched_by_set(&post, &baseline, &batch), ZONE_TTL),
            None => Vec::new(),
        })
    }

    async fn delete_records(&self, _zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let baseline = self.zone.snapshot();
        let batch = compute_delete_batch(&to_provider_records(records), &baseline);
        Ok(match self.submit(&batch) {
            Some(post) => to_records(&attributable(&batch, &post), ZONE_TTL),
            None => Vec::new(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}

/// Provider that can only list
pub struct ReadOnlyProvider;

#[async_trait]
impl ZoneProvider for ReadOnlyProvider {
    async fn get_records(&self, _zone: &str) -> Result<Vec<Record>> {
        Ok(Vec::new())
    }

    fn provider_name(&self) -> &'static str {
        "read-only"
    }
}

/// Factory for [`MemoryProvider`], configured through `ProviderConfig::Custom`
///
/// `config.records` is a JSON array of provider records seeding the zone.
pub struct MemoryFactory;

impl ZoneProviderFactory for MemoryFactory {
    fn create(&self, config: &ProviderConfig, _client: &ClientConfig) -> Result<Box<dyn ZoneProvider>> {
        match config {
            ProviderConfig::Custom { config, .. } => {
                let records: Vec<ProviderRecord> =
                    serde_json::from_value(config["records"].clone())?;
                Ok(Box::new(MemoryProvider::new(records)))
            }
            _ => Err(Error::config("Invalid config for memory provider")),
        }
    }
}

pub fn rec(id: &str, host: &str, ty: &str, dest: &str, priority: u32) -> ProviderRecord {
    ProviderRecord::new(host, ty, dest)
        .with_id(id)
        .with_priority(priority)
}
