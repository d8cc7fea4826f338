//! Result differ
//!
//! The provider's update action answers with the whole post-update record
//! set, not with what changed. These helpers recover the part of that set a
//! request is responsible for by comparing ids against the pre-update
//! baseline: created records get fresh ids, existing records keep theirs.

use crate::record::{ProviderRecord, RecordBatch};
use std::collections::HashSet;

/// Records of `result` whose id does not appear in `baseline`
///
/// Order follows `result`. Comparison is by `id` only.
pub fn attributable(result: &[ProviderRecord], baseline: &[ProviderRecord]) -> RecordBatch {
    let known: HashSet<&str> = baseline.iter().map(|r| r.id.as_str()).collect();
    result
        .iter()
        .filter(|r| !known.contains(r.id.as_str()))
        .cloned()
        .collect()
}

/// Records of `result` created or updated by a set batch
///
/// Created records are the ones [`attributable`] to the request. Updated
/// records are found by the ids the submitted update entries carried.
/// Order follows `result`.
pub fn touched_by_set(
    result: &[ProviderRecord],
    baseline: &[ProviderRecord],
    submitted: &[ProviderRecord],
) -> RecordBatch {
    let known: HashSet<&str> = baseline.iter().map(|r| r.id.as_str()).collect();
    let updated: HashSet<&str> = submitted
        .iter()
        .filter(|r| r.has_id() && known.contains(r.id.as_str()))
        .map(|r| r.id.as_str())
        .collect();

    result
        .iter()
        .filter(|r| !known.contains(r.id.as_str()) || updated.contains(r.id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, host: &str, dest: &str) -> ProviderRecord {
        ProviderRecord::new(host, "A", dest).with_id(id)
    }

    fn ids(batch: &[ProviderRecord]) -> Vec<&str> {
        batch.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_attributable_returns_new_ids_in_result_order() {
        let baseline = vec![rec("1", "www", "1.1.1.1"), rec("2", "api", "1.1.1.2")];
        let result = vec![
            rec("5", "c", "3.3.3.3"),
            rec("1", "www", "1.1.1.1"),
            rec("3", "a", "1.1.1.3"),
            rec("2", "api", "9.9.9.9"),
            rec("4", "b", "1.1.1.4"),
        ];

        assert_eq!(ids(&attributable(&result, &baseline)), vec!["5", "3", "4"]);
    }

    #[test]
    fn test_attributable_is_by_id_only() {
        // Same value, different id: still attributable
        let baseline = vec![rec("1", "www", "1.1.1.1")];
        let result = vec![rec("1", "www", "1.1.1.1"), rec("2", "www", "1.1.1.1")];

        assert_eq!(ids(&attributable(&result, &baseline)), vec!["2"]);
    }

    #[test]
    fn test_attributable_empty_cases() {
        let baseline = vec![rec("1", "www", "1.1.1.1")];

        assert!(attributable(&[], &baseline).is_empty());
        assert!(attributable(&baseline, &baseline).is_empty());
        assert_eq!(ids(&attributable(&baseline, &[])), vec!["1"]);
    }

    #[test]
    fn test_touched_by_set() {
        let baseline = vec![rec("1", "www", "1.1.1.1"), rec("2", "api", "1.1.1.2")];
        let submitted = vec![rec("1", "www", "2.2.2.2"), ProviderRecord::new("new", "A", "3.3.3.3")];
        let result = vec![
            rec("1", "www", "2.2.2.2"),
            rec("2", "api", "1.1.1.2"),
            rec("7", "new", "3.3.3.3"),
        ];

        assert_eq!(ids(&touched_by_set(&result, &baseline, &submitted)), vec!["1", "7"]);
    }
}
