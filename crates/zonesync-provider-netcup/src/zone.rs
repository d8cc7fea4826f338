//! Zone reads and record set updates
//!
//! Thin read-throughs to `infoDnsZone`, `infoDnsRecords` and
//! `updateDnsRecords`. No logic beyond payload decoding.

use crate::protocol::{RecordSet, RecordSetRef, RequestParam, action};
use crate::session::{ActionClient, Session};
use zonesync_core::{ProviderRecord, RecordBatch, Result, ZoneInfo};

impl ActionClient {
    /// Zone metadata, including the zone-wide TTL
    pub async fn get_zone_info(&self, session: &Session, zone: &str) -> Result<ZoneInfo> {
        let param = RequestParam {
            domain_name: Some(zone),
            ..self.params(Some(session))
        };
        self.call(action::INFO_DNS_ZONE, param).await
    }

    /// All records currently in the zone
    pub async fn get_records(&self, session: &Session, zone: &str) -> Result<RecordBatch> {
        let param = RequestParam {
            domain_name: Some(zone),
            ..self.params(Some(session))
        };
        let set: RecordSet = self.call(action::INFO_DNS_RECORDS, param).await?;
        Ok(set.dns_records)
    }

    /// Submit a batch and return the zone's full post-update record set
    ///
    /// The provider applies the batch atomically. The answer is every record
    /// in the zone, not only the submitted ones.
    pub async fn update_records(
        &self,
        session: &Session,
        zone: &str,
        batch: &[ProviderRecord],
    ) -> Result<RecordBatch> {
        let param = RequestParam {
            domain_name: Some(zone),
            dns_record_set: Some(RecordSetRef { dns_records: batch }),
            ..self.params(Some(session))
        };
        let set: RecordSet = self.call(action::UPDATE_DNS_RECORDS, param).await?;
        Ok(set.dns_records)
    }
}
