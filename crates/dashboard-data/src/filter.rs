//! Inclusive date-range filtering of the loaded tables.

use std::collections::HashSet;

use chrono::NaiveDate;
use dashboard_core::models::{DailyRecord, HourlyRecord};
use serde::Serialize;
use tracing::debug;

use crate::reader::Dataset;

// ── DateRange ─────────────────────────────────────────────────────────────────

/// Inclusive `[min, max]` date bounds. `min > max` is a valid, empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateRange {
    pub fn new(min: NaiveDate, max: NaiveDate) -> Self {
        Self { min, max }
    }

    /// The full observed range of the daily table, `None` if it has no rows.
    pub fn observed(dataset: &Dataset) -> Option<Self> {
        dataset
            .date_bounds()
            .map(|(min, max)| Self::new(min, max))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }

    /// `true` when `min > max`, i.e. no date can match.
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Restrict both bounds to `bounds`. Each bound is clamped on its own,
    /// so an inverted range stays inverted.
    pub fn clamp_to(&self, bounds: &DateRange) -> Self {
        Self {
            min: self.min.clamp(bounds.min, bounds.max),
            max: self.max.clamp(bounds.min, bounds.max),
        }
    }
}

// ── FilteredDataset ───────────────────────────────────────────────────────────

/// The subset of a [`Dataset`] that falls inside one [`DateRange`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredDataset {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
}

/// Keep daily rows inside `range` and hourly rows whose date survived the
/// daily filter.
///
/// Hourly rows are semi-joined on the retained daily dates rather than range
/// checked, so an hourly table with a wider span never leaks extra days.
pub fn filter_by_range(dataset: &Dataset, range: &DateRange) -> FilteredDataset {
    let daily: Vec<DailyRecord> = dataset
        .daily
        .iter()
        .filter(|r| range.contains(r.date))
        .copied()
        .collect();

    let kept_dates: HashSet<NaiveDate> = daily.iter().map(|r| r.date).collect();
    let hourly: Vec<HourlyRecord> = dataset
        .hourly
        .iter()
        .filter(|r| kept_dates.contains(&r.date))
        .copied()
        .collect();

    debug!(
        "Filter {}..={} kept {} daily and {} hourly rows",
        range.min,
        range.max,
        daily.len(),
        hourly.len()
    );

    FilteredDataset { daily, hourly }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::models::{DayKind, Season};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(date: NaiveDate, total: u64) -> DailyRecord {
        DailyRecord {
            date,
            month: chrono::Datelike::month(&date),
            year: chrono::Datelike::year(&date),
            weekday: chrono::Datelike::weekday(&date).num_days_from_sunday(),
            season: Season::Spring,
            working_day: DayKind::WorkingDay,
            total_count: total,
            registered_users: total,
            casual_users: 0,
        }
    }

    fn hour(date: NaiveDate, hour: u32, total: u64) -> HourlyRecord {
        HourlyRecord {
            date,
            hour,
            total_count: total,
        }
    }

    fn sample() -> Dataset {
        Dataset {
            daily: vec![
                day(ymd(2011, 1, 1), 100),
                day(ymd(2011, 1, 2), 200),
                day(ymd(2011, 1, 3), 300),
            ],
            hourly: vec![
                // Outside the daily table's span.
                hour(ymd(2010, 12, 31), 23, 9),
                hour(ymd(2011, 1, 1), 0, 10),
                hour(ymd(2011, 1, 1), 1, 20),
                hour(ymd(2011, 1, 2), 0, 30),
                hour(ymd(2011, 1, 3), 5, 40),
                hour(ymd(2011, 1, 4), 0, 50),
            ],
        }
    }

    #[test]
    fn test_filter_inclusive_bounds() {
        let range = DateRange::new(ymd(2011, 1, 1), ymd(2011, 1, 2));
        let filtered = filter_by_range(&sample(), &range);

        let dates: Vec<NaiveDate> = filtered.daily.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![ymd(2011, 1, 1), ymd(2011, 1, 2)]);
        assert_eq!(filtered.hourly.len(), 3);
    }

    #[test]
    fn test_filter_single_day() {
        let d = ymd(2011, 1, 2);
        let filtered = filter_by_range(&sample(), &DateRange::new(d, d));

        assert_eq!(filtered.daily.len(), 1);
        assert!(filtered.daily.iter().all(|r| r.date == d));
        assert_eq!(filtered.hourly.len(), 1);
        assert!(filtered.hourly.iter().all(|r| r.date == d));
    }

    #[test]
    fn test_filter_inverted_range_is_empty() {
        let range = DateRange::new(ymd(2011, 1, 3), ymd(2011, 1, 1));
        assert!(range.is_inverted());

        let filtered = filter_by_range(&sample(), &range);
        assert!(filtered.daily.is_empty());
        assert!(filtered.hourly.is_empty());
    }

    #[test]
    fn test_filter_hourly_is_semi_joined_on_daily_dates() {
        // A range wider than the daily table still drops hourly rows whose
        // date has no daily row.
        let range = DateRange::new(ymd(2010, 12, 1), ymd(2011, 2, 1));
        let filtered = filter_by_range(&sample(), &range);

        assert_eq!(filtered.daily.len(), 3);
        let hourly_dates: HashSet<NaiveDate> = filtered.hourly.iter().map(|r| r.date).collect();
        assert!(!hourly_dates.contains(&ymd(2010, 12, 31)));
        assert!(!hourly_dates.contains(&ymd(2011, 1, 4)));
        assert_eq!(filtered.hourly.len(), 4);
    }

    #[test]
    fn test_filter_does_not_mutate_source() {
        let dataset = sample();
        let before = dataset.clone();
        let _ = filter_by_range(&dataset, &DateRange::new(ymd(2011, 1, 2), ymd(2011, 1, 2)));
        assert_eq!(dataset, before);
    }

    #[test]
    fn test_observed_range() {
        assert_eq!(
            DateRange::observed(&sample()),
            Some(DateRange::new(ymd(2011, 1, 1), ymd(2011, 1, 3)))
        );
        assert_eq!(DateRange::observed(&Dataset::default()), None);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let bounds = DateRange::new(ymd(2011, 1, 1), ymd(2012, 12, 31));

        let wide = DateRange::new(ymd(2010, 6, 1), ymd(2013, 1, 1));
        assert_eq!(wide.clamp_to(&bounds), bounds);

        let inverted = DateRange::new(ymd(2012, 5, 1), ymd(2011, 5, 1));
        let clamped = inverted.clamp_to(&bounds);
        assert_eq!(clamped, inverted);
        assert!(clamped.is_inverted());
    }
}
