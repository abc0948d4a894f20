use crate::domain::model::{Metrics, MonthlySeries, Trend};

/// Min/max bucket counts and the percent change from the first to the last bucket.
///
/// An empty series yields zeroed metrics. A first bucket of 0 yields a 0% change.
/// No rounding is applied here.
pub fn compute_metrics(series: &MonthlySeries) -> Metrics {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Metrics::zeroed();
    };

    let min_count = series.counts().min().unwrap_or(0);
    let max_count = series.counts().max().unwrap_or(0);

    let percent_change = percent_change(first.count, last.count);

    Metrics {
        min_count,
        max_count,
        percent_change,
        trend: trend_of(percent_change),
    }
}

pub fn percent_change(first: usize, last: usize) -> f64 {
    if first == 0 {
        return 0.0;
    }
    (last as f64 - first as f64) / first as f64 * 100.0
}

pub fn trend_of(percent_change: f64) -> Trend {
    if percent_change > 0.0 {
        Trend::Up
    } else if percent_change < 0.0 {
        Trend::Down
    } else {
        Trend::Flat
    }
}
