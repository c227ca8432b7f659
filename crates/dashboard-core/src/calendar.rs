use chrono::{Days, NaiveDate, NaiveDateTime};

// ── Labels ────────────────────────────────────────────────────────────────────

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Full English name for a 1-based month number, `None` outside `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize).copied())
}

/// Full English name for a Sunday-indexed weekday (`0` = Sunday).
pub fn weekday_name(weekday: u32) -> Option<&'static str> {
    WEEKDAY_NAMES.get(weekday as usize).copied()
}

/// Zero-padded hour label, e.g. `3` → `"03.00"`.
pub fn hour_label(hour: u32) -> String {
    format!("{:02}.00", hour)
}

// ── Date parsing ──────────────────────────────────────────────────────────────

/// Day zero of the spreadsheet serial date system.
fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// Parse a date cell into a calendar date.
///
/// Accepts plain dates (`2011-01-01`, `2011/01/01`, `01/31/2011`), ISO
/// date-times with a space or `T` separator (the time is dropped) and
/// spreadsheet serial day numbers. Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dashboard_core::calendar::parse_date;
///
/// let d = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
/// assert_eq!(parse_date("2011-01-01"), Some(d));
/// assert_eq!(parse_date("2011-01-01 00:00:00"), Some(d));
/// assert_eq!(parse_date("40544"), Some(d));
/// assert_eq!(parse_date("soon"), None);
/// ```
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    const DATE_FMTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    for fmt in DATE_FMTS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    const DATETIME_FMTS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // Serial day numbers, optionally with a fractional time-of-day part.
    let whole = s.split_once('.').map_or(s, |(int, _)| int);
    if !whole.is_empty() && whole.bytes().all(|b| b.is_ascii_digit()) {
        let days: u64 = whole.parse().ok()?;
        return serial_epoch().checked_add_days(Days::new(days));
    }

    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────
