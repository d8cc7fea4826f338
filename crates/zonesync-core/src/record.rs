//! Provider record model
//!
//! [`ProviderRecord`] is the unit the provider stores. Two rules live here:
//!
//! - **Equality** compares `host_name`, `record_type`, `destination` and
//!   `priority`. The provider-assigned `id` and the request-time
//!   `marked_for_deletion` flag are not part of a record's value.
//! - **Identity** decides which existing record a desired record refers to:
//!   by `id` when one is supplied, otherwise by host name and type, and for
//!   `MX` additionally by priority (several MX records usually share a host).

use serde::{Deserialize, Serialize};

/// Record type token whose identity includes the priority
pub const MX: &str = "MX";

/// An ordered sequence of records submitted to or returned from an update action
pub type RecordBatch = Vec<ProviderRecord>;

/// A record as the provider stores it
///
/// Serializes to the provider's wire shape:
/// `{id, hostname, type, priority, destination, deleterecord}` where
/// `priority` is a string-encoded integer and `deleterecord` is only present
/// on deletion entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderRecord {
    /// Provider-assigned identifier, empty for records not yet created
    #[serde(default)]
    pub id: String,

    /// Owner name relative to the zone (`"@"`, `"www"`, ...)
    #[serde(rename = "hostname")]
    pub host_name: String,

    /// Record type token (`"A"`, `"MX"`, `"TXT"`, ...)
    #[serde(rename = "type")]
    pub record_type: String,

    /// Only meaningful for types that use it, zero otherwise
    #[serde(default, with = "crate::wire::string_int")]
    pub priority: u32,

    /// Record value or target
    #[serde(default)]
    pub destination: String,

    /// Set only on entries of a deletion batch
    #[serde(
        rename = "deleterecord",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub marked_for_deletion: bool,
}

impl ProviderRecord {
    /// Create a record without an id
    pub fn new(
        host_name: impl Into<String>,
        record_type: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            host_name: host_name.into(),
            record_type: record_type.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Set the provider id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the record carries a provider-assigned id
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Whether `existing` is the record this one refers to
    ///
    /// Priority-ordered strategy:
    /// 1. a non-empty `id` matches by id only;
    /// 2. otherwise non-`MX` records match on host name and type;
    /// 3. `MX` records match on host name, type and priority.
    pub fn matches_identity(&self, existing: &ProviderRecord) -> bool {
        if self.has_id() {
            return self.id == existing.id;
        }
        self.matches_name(existing)
    }

    /// Identity by name only (rules 2 and 3), ignoring any id
    ///
    /// Used for append requests, which never reference provider ids.
    pub fn matches_name(&self, existing: &ProviderRecord) -> bool {
        if self.host_name != existing.host_name || self.record_type != existing.record_type {
            return false;
        }
        self.record_type != MX || self.priority == existing.priority
    }
}

/// Two records are equal when their value is: host name, type, destination
/// and priority. `id` and `marked_for_deletion` are ignored.
impl PartialEq for ProviderRecord {
    fn eq(&self, other: &Self) -> bool {
        self.host_name == other.host_name
            && self.record_type == other.record_type
            && self.destination == other.destination
            && self.priority == other.priority
    }
}

impl Eq for ProviderRecord {}

/// Resolve `candidate` against `existing` using the full identity strategy
///
/// Returns the first match, or `None` when the candidate refers to nothing.
pub fn resolve_identity<'a>(
    candidate: &ProviderRecord,
    existing: &'a [ProviderRecord],
) -> Option<&'a ProviderRecord> {
    existing.iter().find(|record| candidate.matches_identity(record))
}

/// Resolve `candidate` against `existing` by name only (no id lookup)
pub fn resolve_by_name<'a>(
    candidate: &ProviderRecord,
    existing: &'a [ProviderRecord],
) -> Option<&'a ProviderRecord> {
    existing.iter().find(|record| candidate.matches_name(record))
}
