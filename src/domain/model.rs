use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the source dataset.
///
/// `fields` keeps every column verbatim in header order; `opened_at` and
/// `creator_role` are the two columns the dashboard computes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    pub opened_at: NaiveDate,
    pub creator_role: String,
    pub fields: Vec<String>,
}

/// The normalized table, loaded once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    date_column: usize,
    role_column: usize,
    records: Vec<CaseRecord>,
}

impl Dataset {
    pub fn new(
        headers: Vec<String>,
        date_column: usize,
        role_column: usize,
        records: Vec<CaseRecord>,
    ) -> Self {
        Self {
            headers,
            date_column,
            role_column,
            records,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn date_column(&self) -> usize {
        self.date_column
    }

    pub fn role_column(&self) -> usize {
        self.role_column
    }

    pub fn date_column_name(&self) -> &str {
        &self.headers[self.date_column]
    }

    pub fn role_column_name(&self) -> &str {
        &self.headers[self.role_column]
    }

    /// Observed [min, max] of `opened_at`, `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<DateRange> {
        let start = self.records.iter().map(|r| r.opened_at).min()?;
        let end = self.records.iter().map(|r| r.opened_at).max()?;
        Some(DateRange { start, end })
    }

    /// Distinct role values in first-seen order. Blank roles are skipped.
    pub fn roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = Vec::new();
        for record in &self.records {
            let role = record.creator_role.as_str();
            if !role.is_empty() && !roles.iter().any(|r| r == role) {
                roles.push(role.to_string());
            }
        }
        roles
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// `None` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Pull `date` into the range.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.start, self.end)
    }
}

/// One calendar-month bucket, keyed by the last day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month_end: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySeries {
    buckets: Vec<MonthBucket>,
}

impl MonthlySeries {
    /// Buckets must already be in chronological order.
    pub fn from_buckets(buckets: Vec<MonthBucket>) -> Self {
        Self { buckets }
    }

    pub fn buckets(&self) -> &[MonthBucket] {
        &self.buckets
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(|b| b.count)
    }

    pub fn total(&self) -> usize {
        self.counts().sum()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn first(&self) -> Option<&MonthBucket> {
        self.buckets.first()
    }

    pub fn last(&self) -> Option<&MonthBucket> {
        self.buckets.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub min_count: usize,
    pub max_count: usize,
    pub percent_change: f64,
    pub trend: Trend,
}

impl Metrics {
    pub fn zeroed() -> Self {
        Self {
            min_count: 0,
            max_count: 0,
            percent_change: 0.0,
            trend: Trend::Flat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSeries {
    pub role: String,
    pub series: MonthlySeries,
}

/// The user's current choice. Missing dates fall back to the dataset bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub role: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Selection {
    pub fn for_role(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            start: None,
            end: None,
        }
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

/// Everything the presenter needs for one selection.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub role: String,
    pub range: DateRange,
    pub total_cases: usize,
    pub series: MonthlySeries,
    pub metrics: Metrics,
    pub comparison: Vec<RoleSeries>,
}
