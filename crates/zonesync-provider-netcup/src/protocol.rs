//! Action protocol envelope
//!
//! Every call is a POST of `{action, param}` to a single endpoint. Every
//! answer is `{action, status, shortmessage, longmessage, responsedata}`
//! where `responsedata` depends on the action.

use serde::{Deserialize, Serialize};
use zonesync_core::ProviderRecord;

/// Action names used by this crate
pub mod action {
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
    pub const INFO_DNS_ZONE: &str = "infoDnsZone";
    pub const INFO_DNS_RECORDS: &str = "infoDnsRecords";
    pub const UPDATE_DNS_RECORDS: &str = "updateDnsRecords";
}

/// Status value of a successful response
pub const STATUS_SUCCESS: &str = "success";

/// Request envelope
#[derive(Debug, Serialize)]
pub struct ActionRequest<'a> {
    pub action: &'a str,
    pub param: RequestParam<'a>,
}

/// Parameters shared by all actions
///
/// Customer number and API key go with every action. The password is only
/// sent to `login`, the session id to everything after it.
#[derive(Serialize)]
pub struct RequestParam<'a> {
    #[serde(rename = "domainname", skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<&'a str>,

    #[serde(rename = "customernumber")]
    pub customer_number: &'a str,

    #[serde(rename = "apikey")]
    pub api_key: &'a str,

    #[serde(rename = "apipassword", skip_serializing_if = "Option::is_none")]
    pub api_password: Option<&'a str>,

    #[serde(rename = "apisessionid", skip_serializing_if = "Option::is_none")]
    pub api_session_id: Option<&'a str>,

    #[serde(rename = "dnsrecordset", skip_serializing_if = "Option::is_none")]
    pub dns_record_set: Option<RecordSetRef<'a>>,
}

impl std::fmt::Debug for RequestParam<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestParam")
            .field("domain_name", &self.domain_name)
            .field("customer_number", &self.customer_number)
            .field("api_key", &"<REDACTED>")
            .field("api_password", &self.api_password.map(|_| "<REDACTED>"))
            .field("api_session_id", &self.api_session_id.map(|_| "<REDACTED>"))
            .field("dns_record_set", &self.dns_record_set)
            .finish()
    }
}

/// Borrowed record set for submission
#[derive(Debug, Serialize)]
pub struct RecordSetRef<'a> {
    #[serde(rename = "dnsrecords")]
    pub dns_records: &'a [ProviderRecord],
}

/// Response envelope
#[derive(Debug, Default, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub action: String,

    #[serde(default)]
    pub status: String,

    #[serde(rename = "shortmessage", default)]
    pub short_message: String,

    #[serde(rename = "longmessage", default)]
    pub long_message: String,

    #[serde(rename = "responsedata", default)]
    pub response_data: serde_json::Value,
}

impl ActionResponse {
    /// Whether the provider reported success
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// `responsedata` of `login`
#[derive(Deserialize)]
pub struct SessionData {
    #[serde(rename = "apisessionid")]
    pub api_session_id: String,
}

/// `responsedata` of `infoDnsRecords` and `updateDnsRecords`
#[derive(Debug, Default, Deserialize)]
pub struct RecordSet {
    #[serde(rename = "dnsrecords", default)]
    pub dns_records: Vec<ProviderRecord>,
}
