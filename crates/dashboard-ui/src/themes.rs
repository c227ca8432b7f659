use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Light blue used for ordinary bars.
const BAR_BLUE: Color = Color::Rgb(167, 199, 231);
/// Deep blue used for the highest bar.
const PEAK_BLUE: Color = Color::Rgb(0, 76, 153);
/// Title accent.
const ACCENT_BLUE: Color = Color::Rgb(0, 163, 255);

/// Complete theme definition carrying all UI styles used by dashboard-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub warning: Style,

    // ── Date range input ─────────────────────────────────────────────────────
    /// The bound currently being edited.
    pub date_focused: Style,
    pub date_idle: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub bar: Style,
    /// The maximum bar of a chart.
    pub bar_peak: Style,
    pub bar_value: Style,
    pub line: Style,
    pub axis: Style,
    /// First and second segment of a share bar.
    pub share_primary: Style,
    pub share_secondary: Style,

    // ── Tabs ─────────────────────────────────────────────────────────────────
    pub tab: Style,
    pub tab_active: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(ACCENT_BLUE)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),

            date_focused: Style::default()
                .fg(Color::Black)
                .bg(ACCENT_BLUE)
                .add_modifier(Modifier::BOLD),
            date_idle: Style::default().fg(Color::White),

            bar: Style::default().fg(BAR_BLUE),
            bar_peak: Style::default().fg(ACCENT_BLUE),
            bar_value: Style::default().fg(Color::Black).bg(BAR_BLUE),
            line: Style::default().fg(ACCENT_BLUE),
            axis: Style::default().fg(Color::Gray),
            share_primary: Style::default().fg(BAR_BLUE),
            share_secondary: Style::default().fg(ACCENT_BLUE),

            tab: Style::default().fg(Color::Gray),
            tab_active: Style::default()
                .fg(ACCENT_BLUE)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses the deep blue for the peak bar so it stays legible on white.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(PEAK_BLUE)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),

            date_focused: Style::default()
                .fg(Color::White)
                .bg(PEAK_BLUE)
                .add_modifier(Modifier::BOLD),
            date_idle: Style::default().fg(Color::Black),

            bar: Style::default().fg(BAR_BLUE),
            bar_peak: Style::default().fg(PEAK_BLUE),
            bar_value: Style::default().fg(Color::Black).bg(BAR_BLUE),
            line: Style::default().fg(PEAK_BLUE),
            axis: Style::default().fg(Color::DarkGray),
            share_primary: Style::default().fg(BAR_BLUE),
            share_secondary: Style::default().fg(PEAK_BLUE),

            tab: Style::default().fg(Color::DarkGray),
            tab_active: Style::default()
                .fg(PEAK_BLUE)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers and RGB colours for minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            warning: Style::default().fg(Color::Yellow),

            date_focused: Style::default().fg(Color::Black).bg(Color::Cyan),
            date_idle: Style::default().fg(Color::White),

            bar: Style::default().fg(Color::Cyan),
            bar_peak: Style::default().fg(Color::Blue),
            bar_value: Style::default().fg(Color::Black).bg(Color::Cyan),
            line: Style::default().fg(Color::Cyan),
            axis: Style::default().fg(Color::Gray),
            share_primary: Style::default().fg(Color::Cyan),
            share_secondary: Style::default().fg(Color::Blue),

            tab: Style::default().fg(Color::Gray),
            tab_active: Style::default().fg(Color::Cyan),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Bar style: the peak bar is highlighted, every other bar is plain.
    pub fn bar_style(&self, is_peak: bool) -> Style {
        if is_peak {
            self.bar_peak
        } else {
            self.bar
        }
    }

    /// Style for one of the two date bounds.
    pub fn date_style(&self, focused: bool) -> Style {
        if focused {
            self.date_focused
        } else {
            self.date_idle
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(ACCENT_BLUE));
        assert_eq!(t.warning.fg, Some(Color::Yellow));
        assert_eq!(t.bar.fg, Some(BAR_BLUE));
        assert_eq!(t.bar_peak.fg, Some(ACCENT_BLUE));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.bar_peak.fg, Some(PEAK_BLUE));
        assert_eq!(t.share_secondary.fg, Some(PEAK_BLUE));
    }

    #[test]
    fn test_classic_theme_uses_ansi_colours_only() {
        let t = Theme::classic();
        assert!(!t.value.add_modifier.contains(Modifier::BOLD));
        for style in [t.bar, t.bar_peak, t.line, t.share_primary, t.share_secondary] {
            assert!(!matches!(style.fg, Some(Color::Rgb(..))));
        }
    }

    #[test]
    fn test_from_name_known_themes() {
        assert_eq!(Theme::from_name("light").text.fg, Some(Color::Black));
        assert_eq!(Theme::from_name("dark").text.fg, Some(Color::White));
        assert_eq!(Theme::from_name("classic").header.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        // Must not panic; resolves through auto detection.
        let t = Theme::from_name("neon");
        assert!(t.bar.fg.is_some());
    }

    #[test]
    fn test_bar_style_highlights_peak() {
        let t = Theme::dark();
        assert_eq!(t.bar_style(true), t.bar_peak);
        assert_eq!(t.bar_style(false), t.bar);
    }

    #[test]
    fn test_date_style_focus() {
        let t = Theme::dark();
        assert_eq!(t.date_style(true), t.date_focused);
        assert_eq!(t.date_style(false), t.date_idle);
    }
}
