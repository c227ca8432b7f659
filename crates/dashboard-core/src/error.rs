use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bike rental dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A source table does not exist on disk.
    #[error("Data file not found: {0}")]
    MissingSource(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV row could not be decoded (missing column, malformed number, ...).
    #[error("Failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A date cell did not match any recognised format.
    #[error("Invalid date {value:?} in {path} row {row}")]
    DateParse {
        path: PathBuf,
        row: usize,
        value: String,
    },

    /// A coded cell held a value outside its domain.
    #[error("Invalid {column} value {value:?} in {path} row {row}")]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: &'static str,
        value: String,
    },

    /// The daily table loaded but holds no rows, so no date bounds exist.
    #[error("Data file has no rows: {0}")]
    NoRows(PathBuf),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// `true` for the variants raised while loading the source tables.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::MissingSource(_)
                | Self::FileRead { .. }
                | Self::CsvParse { .. }
                | Self::DateParse { .. }
                | Self::InvalidValue { .. }
                | Self::NoRows(_)
        )
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_source() {
        let err = DashboardError::MissingSource(PathBuf::from("/data/cleaned_day.csv"));
        assert_eq!(err.to_string(), "Data file not found: /data/cleaned_day.csv");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DashboardError::FileRead {
            path: PathBuf::from("/data/cleaned_hour.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/cleaned_hour.csv"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_display_date_parse() {
        let err = DashboardError::DateParse {
            path: PathBuf::from("day.csv"),
            row: 4,
            value: "not-a-date".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid date \"not-a-date\" in day.csv row 4");
    }

    #[test]
    fn test_error_display_invalid_value() {
        let err = DashboardError::InvalidValue {
            path: PathBuf::from("day.csv"),
            row: 2,
            column: "season",
            value: "monsoon".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid season value \"monsoon\" in day.csv row 2"
        );
    }

    #[test]
    fn test_error_display_terminal() {
        let err = DashboardError::Terminal("crossterm failure".to_string());
        assert_eq!(err.to_string(), "Terminal error: crossterm failure");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("no data directory".to_string());
        assert_eq!(err.to_string(), "Configuration error: no data directory");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("denied"));
        assert!(!err.is_load_error());
    }

    #[test]
    fn test_load_error_classification() {
        assert!(DashboardError::MissingSource(PathBuf::from("x.csv")).is_load_error());
        assert!(DashboardError::DateParse {
            path: PathBuf::from("x.csv"),
            row: 1,
            value: String::new(),
        }
        .is_load_error());
        assert!(DashboardError::NoRows(PathBuf::from("x.csv")).is_load_error());
        assert!(!DashboardError::Config("bad".to_string()).is_load_error());
    }
}
