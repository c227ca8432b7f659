//! Per-range report pipeline for the bike rental dashboard.
//!
//! Filters the loaded dataset to one date range, runs every aggregation and
//! wraps each result in a [`SectionResult`] so the presentation layer can
//! treat "no data" uniformly.

use dashboard_core::models::{
    DailyRecord, HourStats, MonthYearProgress, MonthlyAverage, SeasonStats, SectionResult,
    SummaryMetrics, UserTypeComparison, WeekdayStats, WorkingDayStats,
};
use serde::Serialize;
use tracing::debug;

use crate::aggregator::RentalAggregator;
use crate::filter::{filter_by_range, DateRange};
use crate::reader::Dataset;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside a report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// The range the report was computed for.
    pub range: DateRange,
    /// Daily rows inside the range.
    pub daily_rows: usize,
    /// Hourly rows that survived the semi-join.
    pub hourly_rows: usize,
    /// Wall-clock seconds spent filtering and aggregating.
    pub compute_time_seconds: f64,
}

/// Everything the dashboard shows for one date range.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub metadata: ReportMetadata,
    pub summary: SectionResult<SummaryMetrics>,
    pub monthyear_progress: SectionResult<Vec<MonthYearProgress>>,
    pub monthly_average: SectionResult<Vec<MonthlyAverage>>,
    pub daily_stats: SectionResult<Vec<WeekdayStats>>,
    pub seasonal_stats: SectionResult<Vec<SeasonStats>>,
    pub hourly_stats: SectionResult<Vec<HourStats>>,
    pub user_types: SectionResult<UserTypeComparison>,
    pub working_days: SectionResult<Vec<WorkingDayStats>>,
}

impl DashboardReport {
    /// Pretty JSON rendering of the whole report.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Headline metrics straight from the filtered daily table.
///
/// Returns `None` when the table is empty.
pub fn summarize(daily: &[DailyRecord]) -> Option<SummaryMetrics> {
    let min = daily.iter().map(|r| r.total_count).min()?;
    let max = daily.iter().map(|r| r.total_count).max()?;
    let total: u64 = daily.iter().map(|r| r.total_count).sum();

    Some(SummaryMetrics {
        total_rentals: total,
        avg_rentals_per_day: total as f64 / daily.len() as f64,
        min_rentals_per_day: min,
        max_rentals_per_day: max,
        total_registered_users: daily.iter().map(|r| r.registered_users).sum(),
        total_casual_users: daily.iter().map(|r| r.casual_users).sum(),
    })
}

/// Run the full pipeline for one range.
///
/// 1. Filter the dataset (hourly rows semi-joined on daily dates).
/// 2. Compute the summary metrics and the seven derived tables.
/// 3. Tag each section as ready, empty or incomplete.
pub fn build_report(dataset: &Dataset, range: &DateRange) -> DashboardReport {
    let start = std::time::Instant::now();

    let filtered = filter_by_range(dataset, range);
    let daily = filtered.daily.as_slice();
    let hourly = filtered.hourly.as_slice();

    let report = DashboardReport {
        summary: summarize(daily).into(),
        monthyear_progress: SectionResult::from_rows(RentalAggregator::monthyear_progress(daily)),
        monthly_average: SectionResult::from_rows(RentalAggregator::monthly_average(daily)),
        daily_stats: SectionResult::from_rows(RentalAggregator::daily_stats(daily)),
        seasonal_stats: SectionResult::from_rows(RentalAggregator::seasonal_stats(daily)),
        hourly_stats: SectionResult::from_rows(RentalAggregator::hourly_stats(hourly)),
        user_types: RentalAggregator::user_type_comparison(daily).into(),
        working_days: working_day_section(RentalAggregator::workingday_comparison(daily)),
        metadata: ReportMetadata {
            range: *range,
            daily_rows: daily.len(),
            hourly_rows: hourly.len(),
            compute_time_seconds: start.elapsed().as_secs_f64(),
        },
    };

    debug!(
        "Built report for {}..={} in {:.4}s",
        range.min, range.max, report.metadata.compute_time_seconds
    );

    report
}

/// A holiday/working-day split is only meaningful when both kinds have rows.
fn working_day_section(rows: Vec<WorkingDayStats>) -> SectionResult<Vec<WorkingDayStats>> {
    if rows.is_empty() {
        SectionResult::Empty
    } else if rows.iter().any(|r| r.stats.is_none()) {
        SectionResult::Incomplete
    } else {
        SectionResult::Ready(rows)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
