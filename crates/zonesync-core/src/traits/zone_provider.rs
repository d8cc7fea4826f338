// # Zone Provider Trait
//
// Defines the interface every DNS provider exposes to callers: list the
// records of a zone and append, replace or delete records in it.
//
// ## Implementations
//
// - netcup: `zonesync-provider-netcup` crate
//
// ## Usage
//
// ```rust,ignore
// use zonesync_core::{Record, ZoneProvider};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* ZoneProvider implementation */;
//
//     let created = provider
//         .append_records("example.com", &[Record::new("A", "www", "203.0.113.7")])
//         .await?;
//
//     Ok(())
// }
// ```

use crate::config::{ClientConfig, ProviderConfig};
use crate::dns_record::Record;
use async_trait::async_trait;

/// Trait for DNS provider implementations
///
/// Each call is a self-contained transaction against the provider: current
/// state is read fresh, nothing is cached between calls, and nothing is
/// retried. A failed call surfaces its error and the caller owns any retry
/// policy.
///
/// Only [`get_records`](Self::get_records) is mandatory. The mutating
/// operations default to [`crate::Error::NotImplemented`] so that a
/// deployment lacking one reports it immediately.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    /// List all records in the zone
    ///
    /// Every returned record carries the zone-wide TTL.
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, crate::Error>;

    /// Add records to the zone
    ///
    /// Records already present with an equal value are skipped.
    ///
    /// # Returns
    ///
    /// The records that were created.
    async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error> {
        let _ = (zone, records);
        Err(crate::Error::not_implemented(self.provider_name(), "append_records"))
    }

    /// Make the zone contain the given records
    ///
    /// Existing records with the same identity are updated in place, the rest
    /// are created.
    ///
    /// # Returns
    ///
    /// The records that were updated or created.
    async fn set_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error> {
        let _ = (zone, records);
        Err(crate::Error::not_implemented(self.provider_name(), "set_records"))
    }

    /// Remove the given records from the zone
    ///
    /// Records that do not exist are skipped.
    ///
    /// # Returns
    ///
    /// The records that were deleted.
    async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error> {
        let _ = (zone, records);
        Err(crate::Error::not_implemented(self.provider_name(), "delete_records"))
    }

    /// Wait for cleanup left behind by cancelled operations
    ///
    /// A cancelled call may leave provider-side state (a login session,
    /// say) to be released in the background. Callers that are about to
    /// exit await this so the cleanup is not cut short. Bounded by the
    /// provider's own cleanup timeout.
    async fn wait_for_teardown(&self) {}

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing zone providers from configuration
pub trait ZoneProviderFactory: Send + Sync {
    /// Create a ZoneProvider instance from configuration
    fn create(
        &self,
        config: &ProviderConfig,
        client: &ClientConfig,
    ) -> Result<Box<dyn ZoneProvider>, crate::Error>;
}
