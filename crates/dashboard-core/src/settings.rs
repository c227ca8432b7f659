use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Default file name of the daily rentals table.
pub const DEFAULT_DAY_FILE: &str = "cleaned_day.csv";
/// Default file name of the hourly rentals table.
pub const DEFAULT_HOUR_FILE: &str = "cleaned_hour.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive dashboard for daily and hourly bike rental data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bike-dashboard",
    about = "Interactive dashboard for daily and hourly bike rental data",
    version
)]
pub struct Settings {
    /// Directory holding the day and hour CSV files
    #[arg(long, env = "BIKE_DASHBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Daily rentals CSV (relative paths resolve against --data-dir)
    #[arg(long, default_value = DEFAULT_DAY_FILE)]
    pub day_file: PathBuf,

    /// Hourly rentals CSV (relative paths resolve against --data-dir)
    #[arg(long, default_value = DEFAULT_HOUR_FILE)]
    pub hour_file: PathBuf,

    /// First date of the initial range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_cli_date)]
    pub min_date: Option<NaiveDate>,

    /// Last date of the initial range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_cli_date)]
    pub max_date: Option<NaiveDate>,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "json"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path (the dashboard view keeps logs only when this is set)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse CLI arguments from the process environment.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Parse an explicit argument list and apply derived overrides.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

/// `value_parser` for the date flags.
fn parse_cli_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got {raw:?}: {e}"))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
