use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    pub muted: Style,
    /// Record title in the location list
    pub label: Style,
    /// "GPS: lat, lon" line under a record
    pub coords: Style,
}

impl Theme {
    pub fn detect() -> Self {
        Self::for_terminal(
            console::Term::stdout().is_term(),
            std::env::var_os("NO_COLOR").is_some(),
        )
    }

    /// Colors only on a terminal that has not opted out with `NO_COLOR`
    pub fn for_terminal(is_term: bool, no_color: bool) -> Self {
        if is_term && !no_color {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().green().bold(),
            success: Style::new().green(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            info: Style::new().blue(),
            dim: Style::new().white().dimmed(),
            muted: Style::new().bright_black(),
            label: Style::new().bold(),
            coords: Style::new().cyan(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            muted: Style::new(),
            label: Style::new(),
            coords: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
