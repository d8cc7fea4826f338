// # netcup DNS Provider
//
// This crate provides a netcup CCP DNS provider implementation for zonesync.
//
// ## Protocol
//
// The CCP API is a single JSON endpoint. Every operation is a POST of
// `{action, param}` and every answer carries `status`, `shortmessage`,
// `longmessage` and an action-specific `responsedata`. Actions used:
//
// - `login` / `logout`: open and close a session
// - `infoDnsZone`: zone metadata (zone-wide TTL)
// - `infoDnsRecords`: all records of a zone
// - `updateDnsRecords`: submit a record batch, answered with the full post-state
//
// ## Behaviour
//
// - One session per top-level call, closed on every exit path
// - All calls through one provider are serialized by an exclusive lock
// - NO retry logic: a failed action surfaces immediately
// - NO caching: zone state is read fresh on every call
// - Dry-run mode computes and logs batches without submitting them
//
// ## Security Requirements
//
// - API key, API password and session ids NEVER appear in logs or Debug output
//
// ## API Reference
//
// - CCP API: https://ccp.netcup.net/run/webservice/servers/endpoint.php

pub mod protocol;
pub mod provider;
pub mod session;
pub mod transport;
pub mod zone;

pub use provider::{NetcupFactory, NetcupProvider};
pub use session::{ActionClient, Credentials, Session, SessionGuard};
pub use transport::{DEFAULT_ENDPOINT, HttpTransport, Transport};

/// Register the netcup provider with a registry
///
/// # Example
///
/// ```rust
/// use zonesync_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// zonesync_provider_netcup::register(&registry);
/// assert!(registry.has_provider("netcup"));
/// ```
pub fn register(registry: &zonesync_core::ProviderRegistry) {
    registry.register_provider("netcup", Box::new(NetcupFactory));
}
