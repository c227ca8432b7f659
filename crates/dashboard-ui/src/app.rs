//! Main application state and TUI event loop for the bike rental dashboard.
//!
//! [`App`] owns the theme, the read-only dataset, the selected date range and
//! the report computed for it. Every range change recomputes the report
//! synchronously before the next frame is drawn.

use std::io;
use std::time::Duration;

use chrono::{Months, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use tracing::debug;

use dashboard_core::{DashboardError, Result};
use dashboard_data::analysis::{build_report, DashboardReport};
use dashboard_data::filter::DateRange;
use dashboard_data::reader::Dataset;

use crate::chart_view::{self, ChartKind};
use crate::components::header::Header;
use crate::components::metrics::metric_cards;
use crate::themes::Theme;

const HELP_TEXT: &str =
    "Tab bound  ←/→ day  ↑/↓ month  Home/End limits  r reset  1-7 n/p chart  q quit";

/// Wrap a crossterm or backend I/O failure.
pub fn terminal_error(err: io::Error) -> DashboardError {
    DashboardError::Terminal(err.to_string())
}

// ── RangeBound ────────────────────────────────────────────────────────────────

/// Which end of the date range the arrow keys currently move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Min,
    Max,
}

impl RangeBound {
    pub fn toggle(self) -> Self {
        match self {
            RangeBound::Min => RangeBound::Max,
            RangeBound::Max => RangeBound::Min,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Loaded tables. Never modified after construction.
    dataset: Dataset,
    /// Observed date bounds of the daily table.
    pub bounds: DateRange,
    /// Range currently selected by the user.
    pub range: DateRange,
    /// Bound being edited.
    pub focus: RangeBound,
    /// Chart panel being shown.
    pub chart: ChartKind,
    /// Report for `range`.
    pub report: DashboardReport,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Build the application and compute the report for `range`.
    ///
    /// `range` is clamped to `bounds` first.
    pub fn new(theme_name: &str, dataset: Dataset, bounds: DateRange, range: DateRange) -> Self {
        let range = range.clamp_to(&bounds);
        let report = build_report(&dataset, &range);
        Self {
            theme: Theme::from_name(theme_name),
            dataset,
            bounds,
            range,
            focus: RangeBound::Min,
            chart: ChartKind::MonthlyProgress,
            report,
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout; the loop exits on
    /// `q`, `Q`, `Esc` or `Ctrl+C`. Terminal failures surface as
    /// [`DashboardError::Terminal`].
    pub fn run(mut self) -> Result<()> {
        self.run_terminal().map_err(terminal_error)
    }

    fn run_terminal(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.toggle(),
            KeyCode::Left => self.shift_focused(|d| d.pred_opt()),
            KeyCode::Right => self.shift_focused(|d| d.succ_opt()),
            KeyCode::Up => self.shift_focused(|d| d.checked_add_months(Months::new(1))),
            KeyCode::Down => self.shift_focused(|d| d.checked_sub_months(Months::new(1))),
            KeyCode::Home => {
                let min = self.bounds.min;
                self.shift_focused(|_| Some(min));
            }
            KeyCode::End => {
                let max = self.bounds.max;
                self.shift_focused(|_| Some(max));
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.set_range(self.bounds),
            KeyCode::Char('n') => self.chart = self.chart.next(),
            KeyCode::Char('p') => self.chart = self.chart.prev(),
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                if let Some(kind) = ChartKind::from_index(index) {
                    self.chart = kind;
                }
            }
            _ => {}
        }
    }

    /// Move the focused bound with `step`, clamped to the observed bounds.
    fn shift_focused(&mut self, step: impl FnOnce(NaiveDate) -> Option<NaiveDate>) {
        let current = match self.focus {
            RangeBound::Min => self.range.min,
            RangeBound::Max => self.range.max,
        };
        let Some(moved) = step(current) else {
            return;
        };

        let mut range = self.range;
        match self.focus {
            RangeBound::Min => range.min = moved,
            RangeBound::Max => range.max = moved,
        }
        self.set_range(range.clamp_to(&self.bounds));
    }

    /// Replace the selected range and recompute the report when it changed.
    fn set_range(&mut self, range: DateRange) {
        if range == self.range {
            return;
        }
        debug!("Range changed to {}..={}", range.min, range.max);
        self.range = range;
        self.report = build_report(&self.dataset, &self.range);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(frame.area());

        let header = Header::new(self.range, self.bounds, self.focus, &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), chunks[0]);

        self.render_metrics(frame, chunks[1]);

        let titles: Vec<Line> = ChartKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| Line::from(format!("{} {}", i + 1, kind.tab_label())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.chart.index())
            .style(self.theme.tab)
            .highlight_style(self.theme.tab_active);
        frame.render_widget(tabs, chunks[2]);

        chart_view::render_chart(frame, chunks[3], self.chart, &self.report, &self.theme);

        let help = Line::from(Span::styled(HELP_TEXT, self.theme.dim));
        frame.render_widget(Paragraph::new(help), chunks[4]);
    }

    fn render_metrics(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP | Borders::BOTTOM);
        let inner = block.inner(area);
        frame.render_widget(block.border_style(self.theme.separator), area);

        let columns = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(inner);

        let cards = metric_cards(&self.report.summary, &self.theme);
        for (col, area) in columns.iter().enumerate() {
            let lines = vec![cards[0][col].to_line(), cards[1][col].to_line()];
            frame.render_widget(Paragraph::new(lines), *area);
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
