use crate::themes::Theme;
use dashboard_core::formatting::percentage;
use ratatui::text::{Line, Span};

/// A two-segment proportional bar comparing two quantities, e.g. registered
/// versus casual users.
///
/// Each side is rendered as a contiguous coloured segment whose width is
/// proportional to its share of the combined total, followed by a legend
/// with one-decimal percentages.
pub struct ShareBar<'a> {
    pub left: (&'static str, f64),
    pub right: (&'static str, f64),
    pub theme: &'a Theme,
    /// Total width of the bar in terminal columns.
    pub width: u16,
}

impl<'a> ShareBar<'a> {
    pub fn new(left: (&'static str, f64), right: (&'static str, f64), theme: &'a Theme) -> Self {
        Self {
            left,
            right,
            theme,
            width: 50,
        }
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width.max(2);
        self
    }

    /// Percentage share of each side, rounded to one decimal.
    pub fn shares(&self) -> (f64, f64) {
        let whole = self.left.1 + self.right.1;
        (
            percentage(self.left.1, whole, 1),
            percentage(self.right.1, whole, 1),
        )
    }

    /// Render the coloured bar.
    pub fn bar_line(&self) -> Line<'a> {
        let whole = self.left.1 + self.right.1;
        let left_chars = if whole > 0.0 {
            ((self.left.1 / whole) * self.width as f64).round() as usize
        } else {
            0
        };
        let right_chars = (self.width as usize).saturating_sub(left_chars);

        Line::from(vec![
            Span::styled("█".repeat(left_chars), self.theme.share_primary),
            Span::styled("█".repeat(right_chars), self.theme.share_secondary),
        ])
    }

    /// Render the legend below the bar.
    pub fn legend_line(&self) -> Line<'a> {
        let (left_pct, right_pct) = self.shares();
        Line::from(vec![
            Span::styled("■ ", self.theme.share_primary),
            Span::styled(format!("{} {:.1}%", self.left.0, left_pct), self.theme.text),
            Span::raw("   "),
            Span::styled("■ ", self.theme.share_secondary),
            Span::styled(
                format!("{} {:.1}%", self.right.0, right_pct),
                self.theme.text,
            ),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
