// # zonesync-core
//
// Core library for reconciling a DNS provider's zone with a desired record set.
//
// ## Architecture Overview
//
// - **ProviderRecord**: the provider's record, with its equality and identity rules
// - **Reconciler**: computes the append/set/delete batch to submit
// - **Result Differ**: recovers the records a request produced from the
//   provider's full post-update record set
// - **ZoneProvider**: trait for provider implementations (list/append/set/delete)
// - **ProviderRegistry**: plugin-based registry for zone providers
//
// ## Design Principles
//
// 1. **Pure Core**: reconciliation is total and side-effect free; all I/O lives in providers
// 2. **Fresh State**: every call reads the zone anew, nothing is cached
// 3. **No Retries**: failures surface to the caller, who owns retry policy
// 4. **Plugin-Based**: providers are registered dynamically, no hard-coded if-else

pub mod config;
pub mod diff;
pub mod dns_record;
pub mod error;
pub mod reconcile;
pub mod record;
pub mod registry;
pub mod traits;
pub mod wire;
pub mod zone;

// Re-export core types for convenience
pub use config::{ClientConfig, ProviderConfig};
pub use diff::{attributable, touched_by_set};
pub use dns_record::{Record, to_provider_records, to_records};
pub use error::{Error, Result};
pub use reconcile::{compute_append_batch, compute_delete_batch, compute_set_batch};
pub use record::{ProviderRecord, RecordBatch};
pub use registry::ProviderRegistry;
pub use traits::{ZoneProvider, ZoneProviderFactory};
pub use zone::ZoneInfo;
