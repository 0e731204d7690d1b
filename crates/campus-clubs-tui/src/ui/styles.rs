use ratatui::style::{Color, Modifier, Style};

/// Color palettes offered on the settings page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    System,
    #[default]
    Dark,
    Light,
    Ocean,
    Sunset,
    CherryBlossom,
}

impl Palette {
    pub const ALL: [Palette; 6] = [
        Palette::System,
        Palette::Dark,
        Palette::Light,
        Palette::Ocean,
        Palette::Sunset,
        Palette::CherryBlossom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Palette::System => "System (Auto)",
            Palette::Dark => "Dark",
            Palette::Light => "Light",
            Palette::Ocean => "Ocean",
            Palette::Sunset => "Sunset",
            Palette::CherryBlossom => "Cherry Blossom",
        }
    }

    /// Next palette in `ALL` order, wrapping
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn theme(&self) -> Theme {
        match self {
            // Terminal's own colors
            Palette::System => Theme {
                background: Color::Reset,
                surface: Color::Reset,
                text: Color::Reset,
                primary: Color::Blue,
                accent: Color::Yellow,
                muted: Color::DarkGray,
                selection: Color::DarkGray,
                success: Color::Green,
                error: Color::Red,
            },
            Palette::Dark => Theme {
                background: Color::Reset,
                surface: Color::Rgb(32, 32, 40),
                text: Color::White,
                primary: Color::Rgb(64, 128, 192),
                accent: Color::Rgb(192, 160, 64),
                muted: Color::Rgb(128, 128, 128),
                selection: Color::Rgb(48, 48, 64),
                success: Color::Rgb(96, 160, 96),
                error: Color::Rgb(192, 64, 64),
            },
            Palette::Light => Theme {
                background: Color::Rgb(250, 250, 250),
                surface: Color::Rgb(230, 232, 238),
                text: Color::Rgb(30, 30, 30),
                primary: Color::Rgb(37, 99, 235),
                accent: Color::Rgb(180, 110, 10),
                muted: Color::Rgb(110, 110, 110),
                selection: Color::Rgb(215, 222, 240),
                success: Color::Rgb(22, 128, 60),
                error: Color::Rgb(200, 40, 40),
            },
            Palette::Ocean => Theme {
                background: Color::Rgb(6, 30, 44),
                surface: Color::Rgb(10, 44, 62),
                text: Color::Rgb(220, 240, 245),
                primary: Color::Rgb(0, 168, 204),
                accent: Color::Rgb(120, 220, 200),
                muted: Color::Rgb(100, 140, 160),
                selection: Color::Rgb(12, 62, 86),
                success: Color::Rgb(80, 200, 140),
                error: Color::Rgb(240, 100, 100),
            },
            Palette::Sunset => Theme {
                background: Color::Rgb(40, 22, 30),
                surface: Color::Rgb(60, 30, 40),
                text: Color::Rgb(250, 230, 215),
                primary: Color::Rgb(255, 125, 80),
                accent: Color::Rgb(255, 190, 90),
                muted: Color::Rgb(170, 130, 120),
                selection: Color::Rgb(90, 44, 56),
                success: Color::Rgb(170, 200, 100),
                error: Color::Rgb(255, 80, 90),
            },
            Palette::CherryBlossom => Theme {
                background: Color::Rgb(255, 243, 247),
                surface: Color::Rgb(248, 222, 232),
                text: Color::Rgb(70, 40, 55),
                primary: Color::Rgb(232, 107, 155),
                accent: Color::Rgb(170, 90, 160),
                muted: Color::Rgb(160, 120, 135),
                selection: Color::Rgb(250, 208, 224),
                success: Color::Rgb(60, 150, 100),
                error: Color::Rgb(200, 40, 80),
            },
        }
    }
}

/// Resolved colors for one palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub selection: Color,
    pub success: Color,
    pub error: Color,
}

// Styles
impl Theme {
    pub fn base_style(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn tab_style(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(self.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(self.text)
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().bg(self.surface).fg(self.text)
    }

    pub fn help_key_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn help_desc_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Colour for an event status badge
    pub fn status_style(&self, status: &str) -> Style {
        match status.to_ascii_lowercase().as_str() {
            "upcoming" | "active" | "open" => self.success_style(),
            "cancelled" | "canceled" | "inactive" => self.error_style(),
            _ => self.muted_style(),
        }
    }
}
