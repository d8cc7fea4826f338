//! Record reconciliation
//!
//! Computes the batch to submit to the provider's update action from a
//! desired record list and the zone's current records. There is one entry
//! point per caller intent:
//!
//! | Intent  | Identity              | Output                               |
//! |---------|-----------------------|--------------------------------------|
//! | append  | name/type(/priority)  | desired records lacking an equal one |
//! | set     | id, then name         | updates (id carried) then appends    |
//! | delete  | id, then name         | matched records flagged for deletion |
//!
//! All functions are pure and total. An empty result means there is nothing
//! to submit, and callers must not send an empty batch to the provider.

use crate::record::{resolve_by_name, resolve_identity, ProviderRecord, RecordBatch};
use tracing::debug;

/// Records to submit for an append request
///
/// A desired record is kept unchanged when no existing record has its
/// identity, or when the one that does is not equal to it. Records that are
/// already present are dropped, so appending twice is a no-op. Input order
/// is preserved.
pub fn compute_append_batch(desired: &[ProviderRecord], existing: &[ProviderRecord]) -> RecordBatch {
    desired
        .iter()
        .filter(|record| match resolve_by_name(record, existing) {
            Some(found) if found == *record => {
                debug!(
                    "append: {} {} already present as id {}, skipping",
                    record.host_name, record.record_type, found.id
                );
                false
            }
            _ => true,
        })
        .cloned()
        .collect()
}

/// Records to submit for a set request
///
/// A desired record whose identity resolves to a different existing record
/// becomes an update carrying the existing id. One that resolves to nothing
/// becomes an append. One that resolves to an equal record is dropped.
///
/// All updates come first, then all appends, each group in input order.
pub fn compute_set_batch(desired: &[ProviderRecord], existing: &[ProviderRecord]) -> RecordBatch {
    let mut updates = Vec::new();
    let mut appends = Vec::new();

    for record in desired {
        match resolve_identity(record, existing) {
            Some(found) if found == record => {
                debug!(
                    "set: {} {} unchanged (id {})",
                    record.host_name, record.record_type, found.id
                );
            }
            Some(found) => {
                debug!(
                    "set: {} {} updates id {}",
                    record.host_name, record.record_type, found.id
                );
                let mut update = record.clone();
                update.id = found.id.clone();
                updates.push(update);
            }
            None => {
                debug!("set: {} {} is new", record.host_name, record.record_type);
                appends.push(record.clone());
            }
        }
    }

    updates.extend(appends);
    updates
}

/// Records to submit for a delete request
///
/// Each desired record that resolves to an existing record yields a
/// deletion entry. The entry takes `id` and `destination` from the existing
/// record, since the provider deletes by what it actually stores rather than
/// by whatever value the caller supplied. Unresolved records are skipped.
pub fn compute_delete_batch(desired: &[ProviderRecord], existing: &[ProviderRecord]) -> RecordBatch {
    desired
        .iter()
        .filter_map(|record| {
            let Some(found) = resolve_identity(record, existing) else {
                debug!(
                    "delete: {} {} not present, skipping",
                    record.host_name, record.record_type
                );
                return None;
            };
            let mut entry = record.clone();
            entry.id = found.id.clone();
            entry.destination = found.destination.clone();
            entry.marked_for_deletion = true;
            Some(entry)
        })
        .collect()
}
