//! CSV loading for the daily and hourly rental tables.
//!
//! Decodes each row with `csv` + `serde`, coerces the date column into a
//! [`NaiveDate`] and validates the coded columns before handing typed
//! records to the filter and aggregation stages.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use dashboard_core::calendar::parse_date;
use dashboard_core::models::{DailyRecord, DayKind, HourlyRecord, Season};
use dashboard_core::{DashboardError, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Both source tables, read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Daily rows sorted by date.
    pub daily: Vec<DailyRecord>,
    /// Hourly rows sorted by date, then hour.
    pub hourly: Vec<HourlyRecord>,
}

impl Dataset {
    /// Earliest and latest date of the daily table, `None` when it is empty.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.daily.iter().map(|r| r.date).min()?;
        let last = self.daily.iter().map(|r| r.date).max()?;
        Some((first, last))
    }
}

// ── Raw CSV rows ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawDailyRow {
    date: String,
    month: u32,
    year: i32,
    weekday: u32,
    season: String,
    working_day: String,
    total_count: u64,
    registered_users: u64,
    casual_users: u64,
}

#[derive(Debug, Deserialize)]
struct RawHourlyRow {
    date: String,
    hour: u32,
    total_count: u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load both tables. Fails on the first unreadable file or invalid row.
pub fn load_dataset(day_path: &Path, hour_path: &Path) -> Result<Dataset> {
    let daily = load_daily(day_path)?;
    let hourly = load_hourly(hour_path)?;

    let inconsistent = daily.iter().filter(|r| !r.user_split_consistent()).count();
    if inconsistent > 0 {
        warn!(
            "{} of {} daily rows have registered + casual != total_count",
            inconsistent,
            daily.len()
        );
    }

    info!(
        "Loaded {} daily rows from {} and {} hourly rows from {}",
        daily.len(),
        day_path.display(),
        hourly.len(),
        hour_path.display()
    );

    Ok(Dataset { daily, hourly })
}

/// Load the daily rentals table.
pub fn load_daily(path: &Path) -> Result<Vec<DailyRecord>> {
    let mut rows: Vec<DailyRecord> = read_rows(path, |row: RawDailyRow, line| {
        let date = coerce_date(path, line, &row.date)?;
        if !(1..=12).contains(&row.month) {
            return Err(invalid(path, line, "month", row.month));
        }
        if row.weekday > 6 {
            return Err(invalid(path, line, "weekday", row.weekday));
        }
        let season =
            Season::parse(&row.season).ok_or_else(|| invalid(path, line, "season", &row.season))?;
        let working_day = DayKind::parse(&row.working_day)
            .ok_or_else(|| invalid(path, line, "working_day", &row.working_day))?;

        Ok(DailyRecord {
            date,
            month: row.month,
            year: row.year,
            weekday: row.weekday,
            season,
            working_day,
            total_count: row.total_count,
            registered_users: row.registered_users,
            casual_users: row.casual_users,
        })
    })?;

    rows.sort_by_key(|r| r.date);
    Ok(rows)
}

/// Load the hourly rentals table.
pub fn load_hourly(path: &Path) -> Result<Vec<HourlyRecord>> {
    let mut rows: Vec<HourlyRecord> = read_rows(path, |row: RawHourlyRow, line| {
        let date = coerce_date(path, line, &row.date)?;
        if row.hour > 23 {
            return Err(invalid(path, line, "hour", row.hour));
        }
        Ok(HourlyRecord {
            date,
            hour: row.hour,
            total_count: row.total_count,
        })
    })?;

    rows.sort_by_key(|r| (r.date, r.hour));
    Ok(rows)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Open `path`, decode every row as `R` and convert it with `convert`.
///
/// `convert` receives the 1-based data row number for error messages.
fn read_rows<R, T>(path: &Path, convert: impl Fn(R, usize) -> Result<T>) -> Result<Vec<T>>
where
    R: for<'de> Deserialize<'de>,
{
    if !path.exists() {
        return Err(DashboardError::MissingSource(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut out = Vec::new();
    for (idx, result) in reader.deserialize::<R>().enumerate() {
        let raw = result.map_err(|source| DashboardError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        out.push(convert(raw, idx + 1)?);
    }

    debug!("Decoded {} rows from {}", out.len(), path.display());
    Ok(out)
}

fn coerce_date(path: &Path, row: usize, raw: &str) -> Result<NaiveDate> {
    parse_date(raw).ok_or_else(|| DashboardError::DateParse {
        path: PathBuf::from(path),
        row,
        value: raw.to_string(),
    })
}

fn invalid(path: &Path, row: usize, column: &'static str, value: impl ToString) -> DashboardError {
    DashboardError::InvalidValue {
        path: path.to_path_buf(),
        row,
        column,
        value: value.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
