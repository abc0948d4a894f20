use crate::core::aggregate::{aggregate_by_role, aggregate_monthly};
use crate::core::dates::MonthLocale;
use crate::core::filter::filter_cases;
use crate::core::metrics::compute_metrics;
use crate::domain::model::{Dataset, DashboardView, DateRange, Selection};
use crate::utils::error::{DashboardError, Result};

/// Holds the loaded dataset and recomputes a view for every selection.
pub struct Dashboard {
    dataset: Dataset,
    locale: MonthLocale,
    roles: Vec<String>,
    bounds: Option<DateRange>,
}

impl Dashboard {
    pub fn new(dataset: Dataset, locale: MonthLocale) -> Self {
        let roles = dataset.roles();
        let bounds = dataset.date_bounds();
        Self {
            dataset,
            locale,
            roles,
            bounds,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn locale(&self) -> &MonthLocale {
        &self.locale
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn date_bounds(&self) -> Option<DateRange> {
        self.bounds
    }

    /// First observed role, used when no role is given.
    pub fn default_role(&self) -> Option<&str> {
        self.roles.first().map(String::as_str)
    }

    /// Resolve the selection against the dataset bounds and run
    /// filter → aggregate → metrics, plus the per-role comparison.
    pub fn view(&self, selection: &Selection) -> Result<DashboardView> {
        let range = self.resolve_range(selection)?;

        if !self.roles.iter().any(|r| *r == selection.role) {
            return Err(DashboardError::ValidationError {
                message: format!(
                    "Unknown role '{}'. Available roles: {}",
                    selection.role,
                    self.roles.join(", ")
                ),
            });
        }

        tracing::debug!(
            "Computing view for role '{}' from {} to {}",
            selection.role,
            range.start,
            range.end
        );

        let subset = filter_cases(self.dataset.records(), &range, &selection.role);
        let total_cases = subset.len();
        let series = aggregate_monthly(subset);
        let metrics = compute_metrics(&series);
        let comparison = aggregate_by_role(self.dataset.records(), &range, &self.roles);

        tracing::debug!(
            "{} cases in {} monthly buckets, {} roles in comparison",
            total_cases,
            series.len(),
            comparison.len()
        );

        Ok(DashboardView {
            role: selection.role.clone(),
            range,
            total_cases,
            series,
            metrics,
            comparison,
        })
    }

    fn resolve_range(&self, selection: &Selection) -> Result<DateRange> {
        let bounds = self.bounds.ok_or_else(|| DashboardError::ValidationError {
            message: "The dataset has no cases to report on".to_string(),
        })?;

        // clamp each end first; only the clamped range has to be ordered
        let start = bounds.clamp(selection.start.unwrap_or(bounds.start));
        let end = bounds.clamp(selection.end.unwrap_or(bounds.end));

        DateRange::new(start, end).ok_or_else(|| DashboardError::ValidationError {
            message: format!(
                "Start date {} must not be after end date {} (data covers {} to {})",
                start, end, bounds.start, bounds.end
            ),
        })
    }
}
