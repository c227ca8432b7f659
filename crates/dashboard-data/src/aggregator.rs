//! Grouped aggregation of filtered rental rows.
//!
//! Every function here is pure: it reads one filtered table and returns a
//! fresh derived table. Categorical groupings always emit the full domain of
//! their key (12 months, 7 weekdays, 4 seasons, 24 hours, 2 day kinds) in
//! canonical order, with `None` aggregates for absent categories. An empty
//! input always yields an empty output.

use std::collections::BTreeMap;

use dashboard_core::calendar::{hour_label, month_name, weekday_name};
use dashboard_core::formatting::round2;
use dashboard_core::models::{
    CountStats, DailyRecord, DayKind, HourStats, HourlyRecord, MonthYearProgress, MonthlyAverage,
    Season, SeasonStats, SumMean, UserTotals, UserTypeComparison, WeekdayStats, WorkingDayStats,
};

// ── CountAccumulator ──────────────────────────────────────────────────────────

/// Running max / min / sum / count of `total_count` for one group.
#[derive(Debug, Clone, Copy, Default)]
struct CountAccumulator {
    max: u64,
    min: u64,
    sum: u64,
    count: u64,
}

impl CountAccumulator {
    fn add(&mut self, value: u64) {
        if self.count == 0 {
            self.max = value;
            self.min = value;
        } else {
            self.max = self.max.max(value);
            self.min = self.min.min(value);
        }
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }

    fn stats(&self) -> CountStats {
        CountStats {
            max: self.max,
            min: self.min,
            sum: self.sum,
            mean: self.mean(),
        }
    }
}

/// Group `(key, value)` pairs and report one accumulator per key of `domain`,
/// in domain order. Keys outside the domain are dropped.
fn group_over_domain<K: Ord + Copy>(
    domain: impl IntoIterator<Item = K>,
    pairs: impl IntoIterator<Item = (K, u64)>,
) -> Vec<(K, Option<CountAccumulator>)> {
    let mut groups: BTreeMap<K, CountAccumulator> = BTreeMap::new();
    for (key, value) in pairs {
        groups.entry(key).or_default().add(value);
    }
    domain
        .into_iter()
        .map(|key| (key, groups.get(&key).copied()))
        .collect()
}

// ── Aggregation pipeline ──────────────────────────────────────────────────────

/// Stateless namespace for the seven dashboard aggregations.
pub struct RentalAggregator;

impl RentalAggregator {
    /// Total rentals per observed (month, year), sorted by year then month.
    pub fn monthyear_progress(daily: &[DailyRecord]) -> Vec<MonthYearProgress> {
        let mut totals: BTreeMap<(i32, u32), u64> = BTreeMap::new();
        for r in daily {
            *totals.entry((r.year, r.month)).or_default() += r.total_count;
        }
        totals
            .into_iter()
            .map(|((year, month), total_count)| MonthYearProgress {
                month,
                year,
                label: format!("{}/{}", month, year),
                total_count,
            })
            .collect()
    }

    /// Mean daily rentals for each of the 12 months, January first.
    pub fn monthly_average(daily: &[DailyRecord]) -> Vec<MonthlyAverage> {
        if daily.is_empty() {
            return Vec::new();
        }
        group_over_domain(1..=12u32, daily.iter().map(|r| (r.month, r.total_count)))
            .into_iter()
            .map(|(month, acc)| MonthlyAverage {
                month,
                month_name: month_name(month).unwrap_or_default(),
                mean: acc.map(|a| a.mean()),
            })
            .collect()
    }

    /// max / min / sum / mean per weekday, Sunday first.
    pub fn daily_stats(daily: &[DailyRecord]) -> Vec<WeekdayStats> {
        if daily.is_empty() {
            return Vec::new();
        }
        group_over_domain(0..=6u32, daily.iter().map(|r| (r.weekday, r.total_count)))
            .into_iter()
            .map(|(weekday, acc)| WeekdayStats {
                weekday,
                weekday_name: weekday_name(weekday).unwrap_or_default(),
                stats: acc.map(|a| a.stats()),
            })
            .collect()
    }

    /// max / min / sum / mean per season, spring → summer → fall → winter.
    pub fn seasonal_stats(daily: &[DailyRecord]) -> Vec<SeasonStats> {
        if daily.is_empty() {
            return Vec::new();
        }
        group_over_domain(Season::ALL, daily.iter().map(|r| (r.season, r.total_count)))
            .into_iter()
            .map(|(season, acc)| SeasonStats {
                season,
                stats: acc.map(|a| a.stats()),
            })
            .collect()
    }

    /// max / min / sum / mean per hour of day, `"00.00"` first.
    pub fn hourly_stats(hourly: &[HourlyRecord]) -> Vec<HourStats> {
        if hourly.is_empty() {
            return Vec::new();
        }
        group_over_domain(0..=23u32, hourly.iter().map(|r| (r.hour, r.total_count)))
            .into_iter()
            .map(|(hour, acc)| HourStats {
                hour,
                label: hour_label(hour),
                stats: acc.map(|a| a.stats()),
            })
            .collect()
    }

    /// Sum and mean of registered and casual users, rounded to 2 decimals.
    ///
    /// Returns `None` for an empty table.
    pub fn user_type_comparison(daily: &[DailyRecord]) -> Option<UserTypeComparison> {
        if daily.is_empty() {
            return None;
        }
        let n = daily.len() as f64;
        let registered: u64 = daily.iter().map(|r| r.registered_users).sum();
        let casual: u64 = daily.iter().map(|r| r.casual_users).sum();

        let totals = |sum: u64| UserTotals {
            sum: round2(sum as f64),
            mean: round2(sum as f64 / n),
        };
        Some(UserTypeComparison {
            registered: totals(registered),
            casual: totals(casual),
        })
    }

    /// Sum and mean of rentals on holidays versus working days.
    pub fn workingday_comparison(daily: &[DailyRecord]) -> Vec<WorkingDayStats> {
        if daily.is_empty() {
            return Vec::new();
        }
        group_over_domain(
            DayKind::ALL,
            daily.iter().map(|r| (r.working_day, r.total_count)),
        )
        .into_iter()
        .map(|(kind, acc)| WorkingDayStats {
            kind,
            stats: acc.map(|a| SumMean {
                sum: a.sum,
                mean: a.mean(),
            }),
        })
        .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
