use crate::app::RangeBound;
use crate::themes::Theme;
use dashboard_data::filter::DateRange;
use ratatui::text::{Line, Span};

/// Decorative string placed either side of the application title.
pub const SPARKLES: &str = "🚲 ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with decorations.
/// 2. A 60-column `=` separator.
/// 3. The selected range in `[ Min 2011-01-01 | Max 2012-12-31 ]` format,
///    with the bound being edited highlighted.
/// 4. The observed range of the data, dimmed.
pub struct Header<'a> {
    pub range: DateRange,
    pub bounds: DateRange,
    pub focus: RangeBound,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(range: DateRange, bounds: DateRange, focus: RangeBound, theme: &'a Theme) -> Self {
        Self {
            range,
            bounds,
            focus,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let min_style = self.theme.date_style(self.focus == RangeBound::Min);
        let max_style = self.theme.date_style(self.focus == RangeBound::Max);

        let mut range_line = vec![
            Span::styled("[ Min ", self.theme.label),
            Span::styled(self.range.min.format("%Y-%m-%d").to_string(), min_style),
            Span::styled(" | Max ", self.theme.label),
            Span::styled(self.range.max.format("%Y-%m-%d").to_string(), max_style),
            Span::styled(" ]", self.theme.label),
        ];
        if self.range.is_inverted() {
            range_line.push(Span::styled("  min is after max", self.theme.warning));
        }

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" BIKE RENTAL DASHBOARD ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(range_line),
            Line::from(Span::styled(
                format!(
                    "Data available {} to {}",
                    self.bounds.min.format("%Y-%m-%d"),
                    self.bounds.max.format("%Y-%m-%d")
                ),
                self.theme.dim,
            )),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
