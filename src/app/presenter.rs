use crate::core::dashboard::Dashboard;
use crate::core::dates::MonthLocale;
use crate::domain::model::{DashboardView, Metrics, MonthlySeries, RoleSeries};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Display strings for one locale.
struct Labels {
    volume: &'static str,
    variation: &'static str,
    min_volume: &'static str,
    max_volume: &'static str,
    total: &'static str,
    month: &'static str,
    comparison: &'static str,
    no_cases: &'static str,
    period: &'static str,
    roles: &'static str,
    available: &'static str,
}

fn labels(locale: &MonthLocale) -> Labels {
    match locale.code() {
        "pt" => Labels {
            volume: "Volume de Atendimentos",
            variation: "Porcentagem de Variação",
            min_volume: "Menor Volume de Atendimentos",
            max_volume: "Maior Volume de Atendimentos",
            total: "Total de casos",
            month: "Mês",
            comparison: "Comparação de Volume de Atendimentos - Operações",
            no_cases: "Nenhum caso no período selecionado",
            period: "Período",
            roles: "Operações disponíveis",
            available: "Dados disponíveis",
        },
        _ => Labels {
            volume: "Case Volume",
            variation: "Percent Variation",
            min_volume: "Lowest Monthly Volume",
            max_volume: "Highest Monthly Volume",
            total: "Total cases",
            month: "Month",
            comparison: "Case Volume Comparison - Roles",
            no_cases: "No cases in the selected period",
            period: "Period",
            roles: "Available roles",
            available: "Data available",
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineSeries {
    pub role: String,
    pub points: Vec<ChartPoint>,
}

/// Chart-ready payload: plain ordered (label, value) sequences.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPayload {
    pub role: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_cases: usize,
    pub metrics: Metrics,
    pub area: Vec<ChartPoint>,
    pub lines: Vec<LineSeries>,
}

/// Role series merged on month: one row per role, one column per month seen in any series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTable {
    pub labels: Vec<String>,
    pub rows: Vec<(String, Vec<Option<usize>>)>,
}

pub fn labeled_points(series: &MonthlySeries, locale: &MonthLocale) -> Vec<ChartPoint> {
    series
        .buckets()
        .iter()
        .map(|bucket| ChartPoint {
            label: locale.month_label(bucket.month_end),
            count: bucket.count,
        })
        .collect()
}

pub fn chart_payload(view: &DashboardView, locale: &MonthLocale) -> ChartPayload {
    ChartPayload {
        role: view.role.clone(),
        start: view.range.start,
        end: view.range.end,
        total_cases: view.total_cases,
        metrics: view.metrics,
        area: labeled_points(&view.series, locale),
        lines: view
            .comparison
            .iter()
            .map(|rs| LineSeries {
                role: rs.role.clone(),
                points: labeled_points(&rs.series, locale),
            })
            .collect(),
    }
}

pub fn align_on_months(comparison: &[RoleSeries], locale: &MonthLocale) -> ComparisonTable {
    let months: BTreeSet<NaiveDate> = comparison
        .iter()
        .flat_map(|rs| rs.series.buckets().iter().map(|b| b.month_end))
        .collect();

    let rows = comparison
        .iter()
        .map(|rs| {
            let cells = months
                .iter()
                .map(|month| {
                    rs.series
                        .buckets()
                        .iter()
                        .find(|b| b.month_end == *month)
                        .map(|b| b.count)
                })
                .collect();
            (rs.role.clone(), cells)
        })
        .collect();

    ComparisonTable {
        labels: months.iter().map(|m| locale.month_label(*m)).collect(),
        rows,
    }
}

/// "Subiu: 50.00%"
pub fn format_variation(metrics: &Metrics, locale: &MonthLocale) -> String {
    format!(
        "{}: {:.2}%",
        locale.trend_word(metrics.trend),
        metrics.percent_change
    )
}

pub fn render_text(view: &DashboardView, locale: &MonthLocale) -> String {
    let l = labels(locale);
    let mut lines = vec![
        format!("{} - {}", l.volume, view.role),
        format!(
            "{}: {} - {}",
            l.period,
            view.range.start.format("%d/%m/%Y"),
            view.range.end.format("%d/%m/%Y")
        ),
        String::new(),
        format!("{}: {}", l.variation, format_variation(&view.metrics, locale)),
        format!("{}: {}", l.min_volume, view.metrics.min_count),
        format!("{}: {}", l.max_volume, view.metrics.max_count),
    ];

    if view.series.is_empty() {
        lines.push(String::new());
        lines.push(l.no_cases.to_string());
        return join_lines(lines);
    }

    lines.push(format!("{}: {}", l.total, view.total_cases));
    lines.push(String::new());
    lines.push(format!("{:<10} {:>8}", l.month, l.volume));
    lines.extend(
        labeled_points(&view.series, locale)
            .into_iter()
            .map(|point| format!("{:<10} {:>8}", point.label, point.count)),
    );

    let table = align_on_months(&view.comparison, locale);
    if !table.rows.is_empty() {
        let role_width = table
            .rows
            .iter()
            .map(|(role, _)| role.chars().count())
            .max()
            .unwrap_or(0)
            .max(l.month.chars().count());

        lines.push(String::new());
        lines.push(l.comparison.to_string());

        let header: String = table.labels.iter().map(|label| format!(" {:>8}", label)).collect();
        lines.push(format!("{:<width$}{}", l.month, header, width = role_width));

        for (role, cells) in &table.rows {
            let row: String = cells
                .iter()
                .map(|cell| match cell {
                    Some(count) => format!(" {:>8}", count),
                    None => format!(" {:>8}", ""),
                })
                .collect();
            lines.push(format!("{:<width$}{}", role, row, width = role_width));
        }
    }

    join_lines(lines)
}

pub fn render_roles(dashboard: &Dashboard) -> String {
    let l = labels(dashboard.locale());

    let mut lines = match dashboard.date_bounds() {
        Some(bounds) => vec![
            format!(
                "{}: {} - {}",
                l.available,
                bounds.start.format("%d/%m/%Y"),
                bounds.end.format("%d/%m/%Y")
            ),
            format!("{}: {}", l.total, dashboard.dataset().len()),
        ],
        None => vec![l.no_cases.to_string()],
    };

    lines.push(format!("{}:", l.roles));
    lines.extend(dashboard.roles().iter().map(|role| format!("  - {}", role)));
    join_lines(lines)
}

/// One line per entry, each newline-terminated.
fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CaseRecord, Dataset, DateRange, MonthBucket, Trend};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(buckets: &[(NaiveDate, usize)]) -> MonthlySeries {
        MonthlySeries::from_buckets(
            buckets
                .iter()
                .map(|(month_end, count)| MonthBucket {
                    month_end: *month_end,
                    count: *count,
                })
                .collect(),
        )
    }

    fn view() -> DashboardView {
        DashboardView {
            role: "Assistente CSF".to_string(),
            range: DateRange::new(d(2023, 1, 3), d(2023, 3, 12)).unwrap(),
            total_cases: 25,
            series: series(&[(d(2023, 1, 31), 10), (d(2023, 3, 31), 15)]),
            metrics: Metrics {
                min_count: 10,
                max_count: 15,
                percent_change: 50.0,
                trend: Trend::Up,
            },
            comparison: vec![
                RoleSeries {
                    role: "Assistente CSF".to_string(),
                    series: series(&[(d(2023, 1, 31), 10), (d(2023, 3, 31), 15)]),
                },
                RoleSeries {
                    role: "Assistente CSF CM".to_string(),
                    series: series(&[(d(2023, 2, 28), 4)]),
                },
            ],
        }
    }

    #[test]
    fn test_format_variation_two_decimals() {
        let pt = MonthLocale::portuguese();
        let mut metrics = view().metrics;
        assert_eq!(format_variation(&metrics, &pt), "Subiu: 50.00%");

        metrics.percent_change = -100.0 / 3.0;
        metrics.trend = Trend::Down;
        assert_eq!(format_variation(&metrics, &pt), "Caiu: -33.33%");

        assert_eq!(format_variation(&Metrics::zeroed(), &MonthLocale::english()), "Flat: 0.00%");
    }

    #[test]
    fn test_align_on_months_fills_blanks() {
        let table = align_on_months(&view().comparison, &MonthLocale::portuguese());

        assert_eq!(table.labels, vec!["Jan 2023", "Fev 2023", "Mar 2023"]);
        assert_eq!(table.rows[0], ("Assistente CSF".to_string(), vec![Some(10), None, Some(15)]));
        assert_eq!(table.rows[1], ("Assistente CSF CM".to_string(), vec![None, Some(4), None]));
    }

    #[test]
    fn test_chart_payload_json_shape() {
        let payload = chart_payload(&view(), &MonthLocale::portuguese());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["role"], "Assistente CSF");
        assert_eq!(json["start"], "2023-01-03");
        assert_eq!(json["total_cases"], 25);
        assert_eq!(json["metrics"]["trend"], "Up");
        assert_eq!(json["area"][1]["label"], "Mar 2023");
        assert_eq!(json["area"][1]["count"], 15);
        assert_eq!(json["lines"][1]["points"][0]["label"], "Fev 2023");
    }

    #[test]
    fn test_render_text_contains_metrics_and_tables() {
        let text = render_text(&view(), &MonthLocale::portuguese());

        assert!(text.contains("Porcentagem de Variação: Subiu: 50.00%"));
        assert!(text.contains("Menor Volume de Atendimentos: 10"));
        assert!(text.contains("Maior Volume de Atendimentos: 15"));
        assert!(text.contains("Total de casos: 25"));
        assert!(text.contains("Comparação de Volume de Atendimentos - Operações"));
        assert!(text.contains("Fev 2023"));
    }

    #[test]
    fn test_render_text_skips_charts_when_empty() {
        let mut empty = view();
        empty.series = MonthlySeries::default();
        empty.metrics = Metrics::zeroed();
        empty.total_cases = 0;

        let text = render_text(&empty, &MonthLocale::english());
        assert!(text.contains("Percent Variation: Flat: 0.00%"));
        assert!(text.contains("No cases in the selected period"));
        assert!(!text.contains("Case Volume Comparison"));
    }

    #[test]
    fn test_render_roles_lists_bounds_and_roles() {
        let records = [(d(2023, 1, 3), "Assistente CSF"), (d(2023, 3, 12), "Assistente CSF CM")]
            .iter()
            .map(|(date, role)| CaseRecord {
                opened_at: *date,
                creator_role: role.to_string(),
                fields: vec![date.to_string(), role.to_string()],
            })
            .collect();
        let dataset = Dataset::new(vec!["date".into(), "role".into()], 0, 1, records);
        let dashboard = Dashboard::new(dataset, MonthLocale::portuguese());

        assert_eq!(
            render_roles(&dashboard),
            "Dados disponíveis: 03/01/2023 - 12/03/2023\n\
             Total de casos: 2\n\
             Operações disponíveis:\n  \
             - Assistente CSF\n  \
             - Assistente CSF CM\n"
        );
    }
}
