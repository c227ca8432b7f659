use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Categorical dimensions ────────────────────────────────────────────────────

/// Meteorological season, ordered spring → summer → fall → winter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Every season in canonical display order.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Parse a season cell: a name (case-insensitive, `autumn` accepted) or
    /// the numeric codes `1..=4`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "spring" | "1" => Some(Season::Spring),
            "summer" | "2" => Some(Season::Summer),
            "fall" | "autumn" | "3" => Some(Season::Fall),
            "winter" | "4" => Some(Season::Winter),
            _ => None,
        }
    }

    /// Lower-case label as shown in charts.
    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a date was a working day. Holidays and weekends sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    Holiday,
    WorkingDay,
}

impl DayKind {
    /// Both kinds in display order.
    pub const ALL: [DayKind; 2] = [DayKind::Holiday, DayKind::WorkingDay];

    /// Parse a working-day cell (`1`/`0`, `true`/`false`, `yes`/`no`,
    /// `working day`/`holiday`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "working day" | "working_day" | "workingday" => {
                Some(DayKind::WorkingDay)
            }
            "0" | "false" | "no" | "holiday" | "weekend" | "non working day" => {
                Some(DayKind::Holiday)
            }
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayKind::Holiday => "Holiday",
            DayKind::WorkingDay => "Working Day",
        }
    }
}

impl fmt::Display for DayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Input records ─────────────────────────────────────────────────────────────

/// One row of the daily rentals table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Calendar month, `1..=12`.
    pub month: u32,
    pub year: i32,
    /// Sunday-indexed weekday, `0..=6`.
    pub weekday: u32,
    pub season: Season,
    pub working_day: DayKind,
    /// Total rentals on this date.
    pub total_count: u64,
    pub registered_users: u64,
    pub casual_users: u64,
}

impl DailyRecord {
    /// `true` when registered + casual users add up to the total count.
    pub fn user_split_consistent(&self) -> bool {
        self.registered_users + self.casual_users == self.total_count
    }
}

/// One row of the hourly rentals table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    /// Hour of day, `0..=23`.
    pub hour: u32,
    pub total_count: u64,
}

// ── Derived tables ────────────────────────────────────────────────────────────

/// max / min / sum / mean of `total_count` over one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountStats {
    pub max: u64,
    pub min: u64,
    pub sum: u64,
    pub mean: f64,
}

/// Sum and mean of `total_count` over one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SumMean {
    pub sum: u64,
    pub mean: f64,
}

/// Total rentals for one observed (month, year) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthYearProgress {
    pub month: u32,
    pub year: i32,
    /// Composite `"month/year"` label, e.g. `"1/2011"`.
    pub label: String,
    pub total_count: u64,
}

/// Mean daily rentals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverage {
    pub month: u32,
    pub month_name: &'static str,
    /// `None` when the month has no rows in range.
    pub mean: Option<f64>,
}

/// Rental statistics for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayStats {
    pub weekday: u32,
    pub weekday_name: &'static str,
    pub stats: Option<CountStats>,
}

/// Rental statistics for one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub season: Season,
    pub stats: Option<CountStats>,
}

/// Rental statistics for one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourStats {
    pub hour: u32,
    /// `"HH.00"` label.
    pub label: String,
    pub stats: Option<CountStats>,
}

/// Sum and mean of one user-type column, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserTotals {
    pub sum: f64,
    pub mean: f64,
}

/// Registered versus casual users over the whole range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserTypeComparison {
    pub registered: UserTotals,
    pub casual: UserTotals,
}

/// Rentals on holidays versus working days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingDayStats {
    pub kind: DayKind,
    pub stats: Option<SumMean>,
}

/// Headline numbers computed straight from the filtered daily table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_rentals: u64,
    pub avg_rentals_per_day: f64,
    pub min_rentals_per_day: u64,
    pub max_rentals_per_day: u64,
    pub total_registered_users: u64,
    pub total_casual_users: u64,
}

// ── SectionResult ─────────────────────────────────────────────────────────────

/// Outcome of one dashboard section for the selected range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum SectionResult<T> {
    /// Data is available for rendering.
    Ready(T),
    /// The filtered range produced no rows.
    Empty,
    /// A two-category comparison did not resolve to both categories.
    Incomplete,
}

impl<T> SectionResult<Vec<T>> {
    /// Wrap a table, mapping an empty one to [`SectionResult::Empty`].
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            SectionResult::Empty
        } else {
            SectionResult::Ready(rows)
        }
    }
}

impl<T> SectionResult<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, SectionResult::Ready(_))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            SectionResult::Ready(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for SectionResult<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(SectionResult::Empty, SectionResult::Ready)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_parse_names_and_codes() {
        assert_eq!(Season::parse("Spring"), Some(Season::Spring));
        assert_eq!(Season::parse(" SUMMER "), Some(Season::Summer));
        assert_eq!(Season::parse("autumn"), Some(Season::Fall));
        assert_eq!(Season::parse("4"), Some(Season::Winter));
        assert_eq!(Season::parse("monsoon"), None);
        assert_eq!(Season::parse("springer"), None);
    }

    #[test]
    fn test_season_order_is_not_alphabetical() {
        let mut seasons = vec![Season::Winter, Season::Fall, Season::Spring, Season::Summer];
        seasons.sort();
        assert_eq!(seasons, Season::ALL.to_vec());
    }

    #[test]
    fn test_day_kind_parse() {
        assert_eq!(DayKind::parse("1"), Some(DayKind::WorkingDay));
        assert_eq!(DayKind::parse("Yes"), Some(DayKind::WorkingDay));
        assert_eq!(DayKind::parse("0"), Some(DayKind::Holiday));
        assert_eq!(DayKind::parse("Holiday"), Some(DayKind::Holiday));
        assert_eq!(DayKind::parse("maybe"), None);
    }

    #[test]
    fn test_day_kind_holiday_sorts_first() {
        assert!(DayKind::Holiday < DayKind::WorkingDay);
        assert_eq!(DayKind::WorkingDay.to_string(), "Working Day");
    }

    #[test]
    fn test_user_split_consistent() {
        let mut rec = DailyRecord {
            date: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            month: 1,
            year: 2011,
            weekday: 6,
            season: Season::Spring,
            working_day: DayKind::Holiday,
            total_count: 985,
            registered_users: 654,
            casual_users: 331,
        };
        assert!(rec.user_split_consistent());
        rec.casual_users = 0;
        assert!(!rec.user_split_consistent());
    }

    #[test]
    fn test_section_result_from_rows() {
        assert_eq!(SectionResult::<Vec<u32>>::from_rows(vec![]), SectionResult::Empty);
        assert_eq!(
            SectionResult::from_rows(vec![1, 2]),
            SectionResult::Ready(vec![1, 2])
        );
    }

    #[test]
    fn test_section_result_from_option() {
        let ready: SectionResult<u8> = Some(3).into();
        assert!(ready.is_ready());
        assert_eq!(ready.as_ready(), Some(&3));
        let empty: SectionResult<u8> = None.into();
        assert_eq!(empty, SectionResult::Empty);
    }

    #[test]
    fn test_section_result_serializes_with_status_tag() {
        let json = serde_json::to_value(SectionResult::Ready(5u32)).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["data"], 5);
        let json = serde_json::to_value(SectionResult::<u32>::Incomplete).unwrap();
        assert_eq!(json["status"], "incomplete");
    }
}
