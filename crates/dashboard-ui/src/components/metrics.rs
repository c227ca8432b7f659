use crate::themes::Theme;
use dashboard_core::formatting::format_count;
use dashboard_core::models::{SectionResult, SummaryMetrics};
use ratatui::text::{Line, Span};

// ── MetricCard ───────────────────────────────────────────────────────────────

/// One labelled headline number, e.g. `"Total Bike Rentals: 3,292,679"`.
///
/// Values are truncated to an integer and grouped with thousands separators.
/// A missing value renders as `"-"`.
pub struct MetricCard<'a> {
    pub label: &'static str,
    pub value: Option<f64>,
    pub theme: &'a Theme,
}

impl<'a> MetricCard<'a> {
    pub fn new(label: &'static str, value: Option<f64>, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            theme,
        }
    }

    pub fn value_text(&self) -> String {
        self.value.map_or_else(|| "-".to_string(), format_count)
    }

    pub fn to_line(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{}: ", self.label), self.theme.label),
            Span::styled(self.value_text(), self.theme.value),
        ])
    }
}

// ── MetricGrid ───────────────────────────────────────────────────────────────

/// The six headline metrics laid out as two rows of three cards.
///
/// Column order follows the dashboard: rentals, averages, user types.
pub fn metric_cards<'a>(
    summary: &SectionResult<SummaryMetrics>,
    theme: &'a Theme,
) -> [[MetricCard<'a>; 3]; 2] {
    let m = summary.as_ready();
    let pick = |f: fn(&SummaryMetrics) -> f64| m.map(f);

    [
        [
            MetricCard::new("Total Bike Rentals", pick(|s| s.total_rentals as f64), theme),
            MetricCard::new("Avg Rentals/Day", pick(|s| s.avg_rentals_per_day), theme),
            MetricCard::new(
                "Total Registered Users",
                pick(|s| s.total_registered_users as f64),
                theme,
            ),
        ],
        [
            MetricCard::new("Min Orders/Day", pick(|s| s.min_rentals_per_day as f64), theme),
            MetricCard::new("Max Orders/Day", pick(|s| s.max_rentals_per_day as f64), theme),
            MetricCard::new(
                "Total Casual Users",
                pick(|s| s.total_casual_users as f64),
                theme,
            ),
        ],
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
