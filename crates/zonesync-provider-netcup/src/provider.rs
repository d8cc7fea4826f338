//! netcup zone provider
//!
//! Every top-level operation runs the same sequence inside one session:
//!
//! ```text
//! login → infoDnsZone → infoDnsRecords → reconcile → updateDnsRecords → diff → logout
//! ```
//!
//! and holds an exclusive lock for the whole of it, network round trips
//! included. The provider's session model and the read-modify-write over
//! the full zone are not safe under interleaving, so concurrent callers are
//! fully serialized.

use crate::session::{ActionClient, Credentials};
use crate::transport::{DEFAULT_ENDPOINT, HttpTransport, Transport};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};
use zonesync_core::{
    ClientConfig, Error, ProviderConfig, ProviderRecord, Record, RecordBatch, Result, ZoneProvider,
    ZoneProviderFactory, attributable, compute_append_batch, compute_delete_batch,
    compute_set_batch, to_provider_records, to_records, touched_by_set,
};

/// What a mutating call asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Append,
    Set,
    Delete,
}

impl Intent {
    fn batch(self, desired: &[ProviderRecord], existing: &[ProviderRecord]) -> RecordBatch {
        match self {
            Intent::Append => compute_append_batch(desired, existing),
            Intent::Set => compute_set_batch(desired, existing),
            Intent::Delete => compute_delete_batch(desired, existing),
        }
    }

    /// Pick the records this request produced out of the post-update state
    fn produced(
        self,
        post_state: &[ProviderRecord],
        baseline: &[ProviderRecord],
        batch: &[ProviderRecord],
    ) -> RecordBatch {
        match self {
            Intent::Append => attributable(post_state, baseline),
            Intent::Set => touched_by_set(post_state, baseline, batch),
            // Deleted entries are the ones gone from the post-state
            Intent::Delete => attributable(batch, post_state),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Intent::Append => "append",
            Intent::Set => "set",
            Intent::Delete => "delete",
        })
    }
}

/// netcup DNS provider
///
/// Constructed once with immutable credentials. Owns the lock that
/// serializes all calls made through it.
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the provider will:
/// - Log in and read zone info and records
/// - Compute and log the batch it would submit
/// - **NOT** call `updateDnsRecords`
///
/// and return the computed batch as the result.
pub struct NetcupProvider {
    client: ActionClient,
    lock: Mutex<()>,
    dry_run: bool,
}

impl NetcupProvider {
    /// Create a provider talking HTTP to the public endpoint
    pub fn new(credentials: Credentials, config: &ClientConfig) -> Result<Self> {
        Self::with_endpoint(credentials, DEFAULT_ENDPOINT, config)
    }

    /// Create a provider talking HTTP to `endpoint`
    pub fn with_endpoint(
        credentials: Credentials,
        endpoint: impl Into<String>,
        config: &ClientConfig,
    ) -> Result<Self> {
        let transport = HttpTransport::new(
            endpoint,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::with_transport(credentials, Arc::new(transport), config))
    }

    /// Create a provider on top of any [`Transport`]
    pub fn with_transport(
        credentials: Credentials,
        transport: Arc<dyn Transport>,
        config: &ClientConfig,
    ) -> Self {
        let client = ActionClient::new(
            transport,
            credentials,
            Duration::from_secs(config.logout_timeout_secs),
        );
        Self {
            client,
            lock: Mutex::new(()),
            dry_run: config.dry_run,
        }
    }

    /// Whether batches are computed but not submitted
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    async fn reconcile(&self, zone: &str, records: &[Record], intent: Intent) -> Result<Vec<Record>> {
        let _serialized = self.lock.lock().await;
        let desired = to_provider_records(records);

        self.client
            .with_session(|session| async move {
                let zone_info = self.client.get_zone_info(&session, zone).await?;
                let existing = self.client.get_records(&session, zone).await?;
                let ttl = zone_info.ttl_duration();

                let batch = intent.batch(&desired, &existing);
                if batch.is_empty() {
                    info!(
                        "{}: nothing to {} ({} desired, {} existing)",
                        zone,
                        intent,
                        desired.len(),
                        existing.len()
                    );
                    return Ok(Vec::new());
                }

                if self.dry_run {
                    warn!(
                        "[DRY-RUN] {}: would submit {} record(s) to {}: {}",
                        zone,
                        batch.len(),
                        intent,
                        serde_json::to_string(&batch)?
                    );
                    return Ok(to_records(&batch, ttl));
                }

                info!("{}: submitting {} record(s) to {}", zone, batch.len(), intent);
                let post_state = self.client.update_records(&session, zone, &batch).await?;
                let produced = intent.produced(&post_state, &existing, &batch);

                info!(
                    "{}: {} done, {} record(s) affected, zone now has {}",
                    zone,
                    intent,
                    produced.len(),
                    post_state.len()
                );
                Ok(to_records(&produced, ttl))
            })
            .await
    }
}

impl fmt::Debug for NetcupProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetcupProvider")
            .field("client", &self.client)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ZoneProvider for NetcupProvider {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        let _serialized = self.lock.lock().await;

        self.client
            .with_session(|session| async move {
                let zone_info = self.client.get_zone_info(&session, zone).await?;
                let records = self.client.get_records(&session, zone).await?;
                info!("{}: {} record(s), ttl {}s", zone, records.len(), zone_info.ttl);
                Ok(to_records(&records, zone_info.ttl_duration()))
            })
            .await
    }

    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        self.reconcile(zone, records, Intent::Append).await
    }

    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        self.reconcile(zone, records, Intent::Set).await
    }

    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        self.reconcile(zone, records, Intent::Delete).await
    }

    async fn wait_for_teardown(&self) {
        self.client.wait_for_abandoned().await;
    }

    fn provider_name(&self) -> &'static str {
        "netcup"
    }
}

/// Factory for creating netcup providers
pub struct NetcupFactory;

impl ZoneProviderFactory for NetcupFactory {
    fn create(&self, config: &ProviderConfig, client: &ClientConfig) -> Result<Box<dyn ZoneProvider>> {
        match config {
            ProviderConfig::Netcup {
                customer_number,
                api_key,
                api_password,
                endpoint,
            } => {
                let credentials = Credentials::new(
                    customer_number.clone(),
                    api_key.clone(),
                    api_password.clone(),
                );

                if client.dry_run {
                    warn!("netcup provider running in DRY-RUN mode - no changes will be made");
                }

                let endpoint = endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
                Ok(Box::new(NetcupProvider::with_endpoint(
                    credentials,
                    endpoint,
                    client,
                )?))
            }
            _ => Err(Error::config("Invalid config for netcup provider")),
        }
    }
}
