use crate::domain::model::{CaseRecord, DateRange};

/// Rows opened within `range` (both ends inclusive) by `role`.
pub fn filter_cases<'a>(records: &'a [CaseRecord], range: &DateRange, role: &str) -> Vec<&'a CaseRecord> {
    records
        .iter()
        .filter(|record| range.contains(record.opened_at) && record.creator_role == role)
        .collect()
}
