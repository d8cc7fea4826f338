//! Caller-facing record type
//!
//! [`Record`] is what callers of a [`crate::ZoneProvider`] exchange. It is
//! translated to and from [`ProviderRecord`] at the provider boundary without
//! loss. `ttl` is zone-wide on the provider side: it is filled in on reads
//! and ignored on writes.

use crate::record::ProviderRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A DNS record as seen by callers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned id, empty for records that do not exist yet
    #[serde(default)]
    pub id: String,

    /// Record type (`"A"`, `"MX"`, ...)
    #[serde(rename = "type")]
    pub record_type: String,

    /// Owner name relative to the zone
    pub name: String,

    /// Record value
    #[serde(default)]
    pub value: String,

    /// Time to live, in whole seconds on the serde side
    #[serde(default, with = "ttl_secs")]
    pub ttl: Duration,

    /// Priority for types that use one
    #[serde(default)]
    pub priority: u32,
}

impl Record {
    /// Create a record with no id, ttl or priority
    pub fn new(
        record_type: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            record_type: record_type.into(),
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl From<&Record> for ProviderRecord {
    fn from(record: &Record) -> Self {
        ProviderRecord {
            id: record.id.clone(),
            host_name: record.name.clone(),
            record_type: record.record_type.clone(),
            destination: record.value.clone(),
            priority: record.priority,
            marked_for_deletion: false,
        }
    }
}

/// Translate caller records for submission (ttl is dropped)
pub fn to_provider_records(records: &[Record]) -> Vec<ProviderRecord> {
    records.iter().map(ProviderRecord::from).collect()
}

/// Translate provider records for callers, filling in the zone ttl
pub fn to_records(records: &[ProviderRecord], ttl: Duration) -> Vec<Record> {
    records
        .iter()
        .map(|r| Record {
            id: r.id.clone(),
            record_type: r.record_type.clone(),
            name: r.host_name.clone(),
            value: r.destination.clone(),
            ttl,
            priority: r.priority,
        })
        .collect()
}

mod ttl_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(ttl.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
