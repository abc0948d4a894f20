use crate::core::filter::filter_cases;
use crate::domain::model::{CaseRecord, DateRange, MonthBucket, MonthlySeries, RoleSeries};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Last calendar day of the month `date` falls in.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// Count records per calendar month. Months without records are not emitted.
pub fn aggregate_monthly<'a, I>(records: I) -> MonthlySeries
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(month_end(record.opened_at)).or_insert(0) += 1;
    }

    MonthlySeries::from_buckets(
        counts
            .into_iter()
            .map(|(month_end, count)| MonthBucket { month_end, count })
            .collect(),
    )
}

/// One independent series per role over the shared range. Roles with no cases
/// in the range are left out.
pub fn aggregate_by_role(records: &[CaseRecord], range: &DateRange, roles: &[String]) -> Vec<RoleSeries> {
    roles
        .iter()
        .filter_map(|role| {
            let series = aggregate_monthly(filter_cases(records, range, role));
            (!series.is_empty()).then(|| RoleSeries {
                role: role.clone(),
                series,
            })
        })
        .collect()
}
