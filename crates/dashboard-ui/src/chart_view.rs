//! Chart panels for the bike rental dashboard.
//!
//! One [`ChartKind`] is shown at a time. Categorical tables become bar
//! charts with the maximum bar highlighted, the monthly progress table
//! becomes a line chart and the two-way comparisons become share bars.
//! Sections without data render a notice instead of a chart.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset as LineSeries, GraphType,
        Paragraph, Wrap,
    },
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use dashboard_core::formatting::{format_count, format_optional};
use dashboard_core::models::{
    HourStats, MonthYearProgress, MonthlyAverage, SeasonStats, SectionResult, UserTypeComparison,
    WeekdayStats, WorkingDayStats,
};
use dashboard_data::analysis::DashboardReport;

use crate::components::share_bar::ShareBar;
use crate::themes::Theme;

/// Notice for a section whose filtered range produced no rows.
pub const NO_DATA_MESSAGE: &str = "No data available to display.";

/// Notice for a holiday/working-day split missing one of its categories.
pub const INCOMPLETE_WORKING_DAY_MESSAGE: &str =
    "Data for both Holiday and Working Day is missing or incomplete.";

const BAR_GAP: u16 = 1;

// ── ChartKind ─────────────────────────────────────────────────────────────────

/// The seven chart panels, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    MonthlyProgress,
    MonthlyAverage,
    DailyAverage,
    SeasonalAverage,
    HourlyTotals,
    UserTypes,
    WorkingDays,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::MonthlyProgress,
        ChartKind::MonthlyAverage,
        ChartKind::DailyAverage,
        ChartKind::SeasonalAverage,
        ChartKind::HourlyTotals,
        ChartKind::UserTypes,
        ChartKind::WorkingDays,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::MonthlyProgress => "Monthly Progress",
            ChartKind::MonthlyAverage => "Average Monthly Rentals",
            ChartKind::DailyAverage => "Average Daily Rentals",
            ChartKind::SeasonalAverage => "Average Seasonal Rentals",
            ChartKind::HourlyTotals => "Total Bike Rentals by Hour",
            ChartKind::UserTypes => "Total Bike Rentals by User Type",
            ChartKind::WorkingDays => "Holiday vs. Working Day Rentals",
        }
    }

    /// Short tab label.
    pub fn tab_label(self) -> &'static str {
        match self {
            ChartKind::MonthlyProgress => "Progress",
            ChartKind::MonthlyAverage => "Monthly",
            ChartKind::DailyAverage => "Daily",
            ChartKind::SeasonalAverage => "Seasonal",
            ChartKind::HourlyTotals => "Hourly",
            ChartKind::UserTypes => "User Type",
            ChartKind::WorkingDays => "Working Day",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ── Bar data ──────────────────────────────────────────────────────────────────

/// One category of a bar chart. `value` is `None` when the category had no
/// rows in the selected range.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub label: String,
    pub value: Option<f64>,
}

impl BarPoint {
    fn new(label: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

pub fn monthly_average_points(rows: &[MonthlyAverage]) -> Vec<BarPoint> {
    rows.iter()
        .map(|r| BarPoint::new(r.month_name, r.mean))
        .collect()
}

pub fn weekday_points(rows: &[WeekdayStats]) -> Vec<BarPoint> {
    rows.iter()
        .map(|r| BarPoint::new(r.weekday_name, r.stats.map(|s| s.mean)))
        .collect()
}

pub fn season_points(rows: &[SeasonStats]) -> Vec<BarPoint> {
    rows.iter()
        .map(|r| BarPoint::new(r.season.label(), r.stats.map(|s| s.mean)))
        .collect()
}

/// Hourly bars show the total, not the mean.
pub fn hour_points(rows: &[HourStats]) -> Vec<BarPoint> {
    rows.iter()
        .map(|r| BarPoint::new(r.label.clone(), r.stats.map(|s| s.sum as f64)))
        .collect()
}

/// Flags every bar equal to the maximum value. Ties are all highlighted.
pub fn peak_flags(points: &[BarPoint]) -> Vec<bool> {
    let max = points
        .iter()
        .filter_map(|p| p.value)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));

    points
        .iter()
        .map(|p| matches!((p.value, max), (Some(v), Some(m)) if v >= m))
        .collect()
}

/// Width of each bar so that `count` bars and their gaps fill `available`
/// columns.
pub fn bar_width(available: u16, count: usize) -> u16 {
    if count == 0 {
        return 1;
    }
    let count = count as u16;
    let gaps = BAR_GAP.saturating_mul(count.saturating_sub(1));
    (available.saturating_sub(gaps) / count).max(1)
}

/// Truncate `label` to at most `width` display columns.
pub fn fit_label(label: &str, width: usize) -> String {
    if label.width() <= width {
        return label.to_string();
    }
    let mut used = 0;
    let mut out = String::new();
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

// ── Public render entry points ────────────────────────────────────────────────

/// Render the selected chart for `report` into `area`.
pub fn render_chart(
    frame: &mut Frame,
    area: Rect,
    kind: ChartKind,
    report: &DashboardReport,
    theme: &Theme,
) {
    let title = kind.title();
    match kind {
        ChartKind::MonthlyProgress => match &report.monthyear_progress {
            SectionResult::Ready(rows) => render_progress(frame, area, title, rows, theme),
            other => render_section_notice(frame, area, title, other, theme),
        },
        ChartKind::MonthlyAverage => match &report.monthly_average {
            SectionResult::Ready(rows) => {
                render_bars(frame, area, title, &monthly_average_points(rows), theme)
            }
            other => render_section_notice(frame, area, title, other, theme),
        },
        ChartKind::DailyAverage => match &report.daily_stats {
            SectionResult::Ready(rows) => {
                render_bars(frame, area, title, &weekday_points(rows), theme)
            }
            other => render_section_notice(frame, area, title, other, theme),
        },
        ChartKind::SeasonalAverage => match &report.seasonal_stats {
            SectionResult::Ready(rows) => {
                render_bars(frame, area, title, &season_points(rows), theme)
            }
            other => render_section_notice(frame, area, title, other, theme),
        },
        ChartKind::HourlyTotals => match &report.hourly_stats {
            SectionResult::Ready(rows) => {
                render_bars(frame, area, title, &hour_points(rows), theme)
            }
            other => render_section_notice(frame, area, title, other, theme),
        },
        ChartKind::UserTypes => match &report.user_types {
            SectionResult::Ready(users) => render_user_types(frame, area, title, users, theme),
            other => render_section_notice(frame, area, title, other, theme),
        },
        ChartKind::WorkingDays => match &report.working_days {
            SectionResult::Ready(rows) => render_working_days(frame, area, title, rows, theme),
            other => render_section_notice(frame, area, title, other, theme),
        },
    }
}

/// Render a bordered panel holding a single warning line.
pub fn render_notice(frame: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let block = titled_block(title, theme);
    let paragraph = Paragraph::new(Line::from(Span::styled(message.to_string(), theme.warning)))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn render_section_notice<T>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    section: &SectionResult<T>,
    theme: &Theme,
) {
    let message = match section {
        SectionResult::Incomplete => INCOMPLETE_WORKING_DAY_MESSAGE,
        _ => NO_DATA_MESSAGE,
    };
    render_notice(frame, area, title, message, theme);
}

fn titled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", title), theme.header))
}

fn render_bars(frame: &mut Frame, area: Rect, title: &str, points: &[BarPoint], theme: &Theme) {
    let block = titled_block(title, theme);
    let inner_width = block.inner(area).width;
    let width = bar_width(inner_width, points.len());
    let peaks = peak_flags(points);

    let bars: Vec<Bar> = points
        .iter()
        .zip(peaks)
        .map(|(point, is_peak)| {
            let value_text = point.value.map_or_else(|| "-".to_string(), format_count);
            Bar::default()
                .value(point.value.map_or(0, |v| v.round().max(0.0) as u64))
                .text_value(value_text)
                .label(Line::from(fit_label(&point.label, width as usize)))
                .style(theme.bar_style(is_peak))
                .value_style(theme.bar_value)
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(width)
        .bar_gap(BAR_GAP)
        .label_style(theme.axis);
    frame.render_widget(chart, area);
}

fn render_progress(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[MonthYearProgress],
    theme: &Theme,
) {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.total_count as f64))
        .collect();
    let y_max = rows.iter().map(|r| r.total_count).max().unwrap_or(0) as f64;
    let y_top = (y_max * 1.1).max(1.0);
    let x_top = (rows.len().saturating_sub(1) as f64).max(1.0);

    let first = rows.first().map(|r| r.label.clone()).unwrap_or_default();
    let middle = rows
        .get(rows.len() / 2)
        .map(|r| r.label.clone())
        .unwrap_or_default();
    let last = rows.last().map(|r| r.label.clone()).unwrap_or_default();

    let series = LineSeries::default()
        .name("Total Rentals")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.line)
        .data(&points);

    let chart = Chart::new(vec![series])
        .block(titled_block(title, theme))
        .x_axis(
            Axis::default()
                .title("Month")
                .style(theme.axis)
                .bounds([0.0, x_top])
                .labels(vec![first, middle, last]),
        )
        .y_axis(
            Axis::default()
                .title("Total Rentals")
                .style(theme.axis)
                .bounds([0.0, y_top])
                .labels(vec![
                    "0".to_string(),
                    format_count(y_top / 2.0),
                    format_count(y_top),
                ]),
        );
    frame.render_widget(chart, area);
}

fn render_user_types(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    users: &UserTypeComparison,
    theme: &Theme,
) {
    let block = titled_block(title, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bar = ShareBar::new(
        ("Registered", users.registered.mean),
        ("Casual", users.casual.mean),
        theme,
    )
    .with_width(inner.width.saturating_sub(2));

    let detail = vec![
        stat_line("Registered", users.registered.sum, users.registered.mean, theme),
        stat_line("Casual", users.casual.sum, users.casual.mean, theme),
    ];
    render_share_panel(frame, inner, &bar, detail, theme);
}

fn render_working_days(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[WorkingDayStats],
    theme: &Theme,
) {
    let block = titled_block(title, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Rows arrive holiday first; both carry stats once the section is ready.
    let mean_of = |i: usize| rows.get(i).and_then(|r| r.stats).map_or(0.0, |s| s.mean);
    let bar = ShareBar::new(("Holiday", mean_of(0)), ("Working Day", mean_of(1)), theme)
        .with_width(inner.width.saturating_sub(2));

    let detail = rows
        .iter()
        .map(|r| {
            let (sum, mean) = r.stats.map_or((None, None), |s| (Some(s.sum as f64), Some(s.mean)));
            Line::from(vec![
                Span::styled(format!("{:<12}", r.kind.label()), theme.label),
                Span::styled(
                    format!(
                        "total {:>12}   mean {:>10}",
                        sum.map_or_else(|| "-".to_string(), format_count),
                        format_optional(mean, 2)
                    ),
                    theme.value,
                ),
            ])
        })
        .collect();
    render_share_panel(frame, inner, &bar, detail, theme);
}

fn stat_line<'a>(label: &str, sum: f64, mean: f64, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), theme.label),
        Span::styled(
            format!(
                "total {:>12}   mean {:>10}",
                format_count(sum),
                format_optional(Some(mean), 2)
            ),
            theme.value,
        ),
    ])
}

fn render_share_panel(
    frame: &mut Frame,
    area: Rect,
    bar: &ShareBar,
    detail: Vec<Line>,
    theme: &Theme,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    let caption = Line::from(Span::styled("Share of average rentals per day", theme.dim));
    frame.render_widget(Paragraph::new(caption), chunks[0]);
    frame.render_widget(Paragraph::new(bar.bar_line()), chunks[1]);
    frame.render_widget(Paragraph::new(bar.legend_line()), chunks[2]);
    frame.render_widget(Paragraph::new(detail), chunks[4]);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use dashboard_core::models::{DailyRecord, DayKind, HourlyRecord, Season};
    use dashboard_data::analysis::build_report;
    use dashboard_data::filter::DateRange;
    use dashboard_data::reader::Dataset;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(date: NaiveDate, kind: DayKind, total: u64) -> DailyRecord {
        DailyRecord {
            date,
            month: date.month(),
            year: date.year(),
            weekday: date.weekday().num_days_from_sunday(),
            season: Season::Winter,
            working_day: kind,
            total_count: total,
            registered_users: total * 3 / 4,
            casual_users: total - total * 3 / 4,
        }
    }

    fn dataset() -> Dataset {
        Dataset {
            daily: vec![
                day(ymd(2011, 1, 1), DayKind::Holiday, 985),
                day(ymd(2011, 1, 3), DayKind::WorkingDay, 1_349),
                day(ymd(2011, 2, 7), DayKind::WorkingDay, 1_600),
            ],
            hourly: vec![
                HourlyRecord {
                    date: ymd(2011, 1, 1),
                    hour: 0,
                    total_count: 16,
                },
                HourlyRecord {
                    date: ymd(2011, 1, 3),
                    hour: 8,
                    total_count: 94,
                },
            ],
        }
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(kind: ChartKind, report: &DashboardReport) -> String {
        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_chart(frame, frame.area(), kind, report, &theme))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    // ── ChartKind ─────────────────────────────────────────────────────────────

    #[test]
    fn test_chart_kind_cycles() {
        assert_eq!(ChartKind::MonthlyProgress.next(), ChartKind::MonthlyAverage);
        assert_eq!(ChartKind::WorkingDays.next(), ChartKind::MonthlyProgress);
        assert_eq!(ChartKind::MonthlyProgress.prev(), ChartKind::WorkingDays);
        assert_eq!(ChartKind::from_index(4), Some(ChartKind::HourlyTotals));
        assert_eq!(ChartKind::from_index(7), None);
        for (i, kind) in ChartKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    // ── Bar data ──────────────────────────────────────────────────────────────

    #[test]
    fn test_peak_flags_marks_max_and_ties() {
        let points = vec![
            BarPoint::new("a", Some(10.0)),
            BarPoint::new("b", Some(30.0)),
            BarPoint::new("c", None),
            BarPoint::new("d", Some(30.0)),
        ];
        assert_eq!(peak_flags(&points), vec![false, true, false, true]);
    }

    #[test]
    fn test_peak_flags_all_missing() {
        let points = vec![BarPoint::new("a", None), BarPoint::new("b", None)];
        assert_eq!(peak_flags(&points), vec![false, false]);
    }

    #[test]
    fn test_bar_width_fills_area() {
        // 24 bars with 23 gaps in 100 columns leaves 77 / 24 = 3 per bar.
        assert_eq!(bar_width(100, 24), 3);
        assert_eq!(bar_width(10, 24), 1);
        assert_eq!(bar_width(50, 0), 1);
    }

    #[test]
    fn test_fit_label_truncates_by_display_width() {
        assert_eq!(fit_label("September", 3), "Sep");
        assert_eq!(fit_label("fall", 10), "fall");
        assert_eq!(fit_label("日本語", 3), "日");
    }

    #[test]
    fn test_hour_points_use_sums() {
        let report = build_report(&dataset(), &DateRange::observed(&dataset()).unwrap());
        let points = hour_points(report.hourly_stats.as_ready().unwrap());
        assert_eq!(points.len(), 24);
        assert_eq!(points[0], BarPoint::new("00.00", Some(16.0)));
        assert_eq!(points[8], BarPoint::new("08.00", Some(94.0)));
        assert_eq!(points[1].value, None);
    }

    #[test]
    fn test_season_points_follow_canonical_order() {
        let report = build_report(&dataset(), &DateRange::observed(&dataset()).unwrap());
        let points = season_points(report.seasonal_stats.as_ready().unwrap());
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["spring", "summer", "fall", "winter"]);
        assert_eq!(points[0].value, None);
        assert!(points[3].value.is_some());
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    #[test]
    fn test_render_every_chart_does_not_panic() {
        let data = dataset();
        let report = build_report(&data, &DateRange::observed(&data).unwrap());
        for kind in ChartKind::ALL {
            let text = draw(kind, &report);
            assert!(text.contains(kind.title()), "{kind:?} title missing");
        }
    }

    #[test]
    fn test_render_empty_range_shows_notice() {
        let data = dataset();
        let report = build_report(&data, &DateRange::new(ymd(2012, 1, 1), ymd(2011, 1, 1)));
        for kind in ChartKind::ALL {
            let text = draw(kind, &report);
            assert!(text.contains(NO_DATA_MESSAGE), "{kind:?} missing notice");
        }
    }

    #[test]
    fn test_render_incomplete_working_days_warns() {
        let data = dataset();
        let report = build_report(&data, &DateRange::new(ymd(2011, 1, 3), ymd(2011, 2, 7)));
        let text = draw(ChartKind::WorkingDays, &report);
        assert!(text.contains(INCOMPLETE_WORKING_DAY_MESSAGE));
    }

    #[test]
    fn test_render_user_types_shows_percentages() {
        let data = dataset();
        let report = build_report(&data, &DateRange::observed(&data).unwrap());
        let text = draw(ChartKind::UserTypes, &report);
        assert!(text.contains("Registered"));
        assert!(text.contains('%'));
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        let data = dataset();
        let report = build_report(&data, &DateRange::observed(&data).unwrap());
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::classic();
        for kind in ChartKind::ALL {
            terminal
                .draw(|frame| render_chart(frame, frame.area(), kind, &report, &theme))
                .unwrap();
        }
    }
}
