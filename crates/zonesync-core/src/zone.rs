//! Zone metadata

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Zone metadata as reported by the provider
///
/// The provider has no per-record TTL: `ttl` applies to every record in
/// the zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneInfo {
    /// Zone name
    pub name: String,

    /// Zone-wide TTL in seconds (string-encoded on the wire)
    #[serde(with = "crate::wire::string_int")]
    pub ttl: u32,
}

impl ZoneInfo {
    /// TTL as a [`Duration`]
    pub fn ttl_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.ttl))
    }
}
