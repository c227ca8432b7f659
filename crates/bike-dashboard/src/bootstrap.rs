use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashboard_core::settings::Settings;
use dashboard_core::DashboardError;
use dashboard_data::filter::DateRange;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI level name to a `tracing` filter directive.
///
/// Unrecognised names pass through lower-cased so `EnvFilter` can still try
/// them as a directive.
pub fn normalise_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Destination of log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file.
    File(PathBuf),
    Stderr,
    /// Drop everything while the terminal UI owns the screen.
    Discard,
}

/// Pick the log destination for a run.
///
/// An explicit `--log-file` always wins. Without one, the interactive view
/// discards logs and every other view writes to stderr.
pub fn log_target(view: &str, log_file: Option<&PathBuf>) -> LogTarget {
    match log_file {
        Some(path) => LogTarget::File(path.clone()),
        None if view == "dashboard" => LogTarget::Discard,
        None => LogTarget::Stderr,
    }
}

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive and
/// falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str, target: &LogTarget) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(normalise_level(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, stderr_layer) = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(layer), None)
        }
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            (None, Some(layer))
        }
        LogTarget::Discard => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

// ── Failure reporting ──────────────────────────────────────────────────────────

/// Headline shown above a fatal error.
pub fn failure_context(err: &DashboardError) -> &'static str {
    if err.is_load_error() {
        "Could not load the bike rental data"
    } else if matches!(err, DashboardError::Terminal(_)) {
        "The terminal dashboard stopped unexpectedly"
    } else {
        "Bike rental dashboard failed"
    }
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Locate the directory holding the CSV files.
///
/// An explicit `--data-dir` wins. Otherwise `<base>/dashboard` is used when
/// it contains `day_file`, falling back to `base` itself.
pub fn discover_data_dir(explicit: Option<&Path>, base: &Path, day_file: &Path) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    let candidates = [base.join("dashboard"), base.to_path_buf()];
    candidates
        .iter()
        .find(|dir| dir.join(day_file).is_file())
        .cloned()
        .unwrap_or_else(|| base.to_path_buf())
}

/// Resolve the day and hour CSV paths from the CLI settings.
///
/// Absolute file paths are used as-is; relative ones resolve against the
/// discovered data directory.
pub fn resolve_data_files(settings: &Settings, base: &Path) -> (PathBuf, PathBuf) {
    let dir = discover_data_dir(settings.data_dir.as_deref(), base, &settings.day_file);
    (dir.join(&settings.day_file), dir.join(&settings.hour_file))
}

// ── Initial range ──────────────────────────────────────────────────────────────

/// The range requested on the command line, clamped to the observed bounds.
///
/// Missing flags default to the corresponding bound.
pub fn initial_range(settings: &Settings, bounds: &DateRange) -> DateRange {
    let requested = DateRange::new(
        settings.min_date.unwrap_or(bounds.min),
        settings.max_date.unwrap_or(bounds.max),
    );
    let clamped = requested.clamp_to(bounds);
    if clamped != requested {
        warn!(
            "Requested range {}..={} clamped to available data {}..={}",
            requested.min, requested.max, clamped.min, clamped.max
        );
    }
    clamped
}

// ── Tests ──────────────────────────────────────────────────────────────────────
