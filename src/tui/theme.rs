// theme support for the tui

use ratatui::style::{Color, Modifier, Style};

use crate::RiskScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Light,
    Dark,
    Midnight,
    Paper,
    HighContrast,
}

impl ThemeKind {
    pub const ALL: &'static [ThemeKind] = &[
        Self::Light,
        Self::Dark,
        Self::Midnight,
        Self::Paper,
        Self::HighContrast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Midnight => "midnight",
            Self::Paper => "paper",
            Self::HighContrast => "high contrast",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn is_light(self) -> bool {
        matches!(self, Self::Light | Self::Paper)
    }

    /// The sun/moon switch: any light theme goes dark and vice versa.
    pub fn toggled(self) -> Self {
        if self.is_light() {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

/// Picks light or dark from the terminal background, dark if unknown.
pub fn detect_theme() -> ThemeKind {
    match terminal_light::luma() {
        Ok(luma) if luma > 0.6 => ThemeKind::Light,
        _ => ThemeKind::Dark,
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub border: Color,
    pub selection: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub muted: Color,
}

impl Theme {
    pub fn from_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Light => Self::light(),
            ThemeKind::Dark => Self::dark(),
            ThemeKind::Midnight => Self::midnight(),
            ThemeKind::Paper => Self::paper(),
            ThemeKind::HighContrast => Self::high_contrast(),
        }
    }

    // gray-50 page, blue primary
    fn light() -> Self {
        Self {
            bg: Color::Rgb(249, 250, 251),
            fg: Color::Rgb(17, 24, 39),
            accent: Color::Rgb(59, 130, 246),
            border: Color::Rgb(209, 213, 219),
            selection: Color::Rgb(219, 234, 254),
            error: Color::Rgb(220, 38, 38),
            success: Color::Rgb(22, 163, 74),
            warning: Color::Rgb(217, 119, 6),
            muted: Color::Rgb(107, 114, 128),
        }
    }

    fn dark() -> Self {
        Self {
            bg: Color::Rgb(17, 24, 39),
            fg: Color::Rgb(229, 231, 235),
            accent: Color::Rgb(96, 165, 250),
            border: Color::Rgb(55, 65, 81),
            selection: Color::Rgb(31, 41, 55),
            error: Color::Rgb(248, 113, 113),
            success: Color::Rgb(74, 222, 128),
            warning: Color::Rgb(251, 191, 36),
            muted: Color::Rgb(156, 163, 175),
        }
    }

    // blue-900 tint
    fn midnight() -> Self {
        Self {
            bg: Color::Rgb(23, 37, 84),
            fg: Color::Rgb(219, 234, 254),
            accent: Color::Rgb(147, 197, 253),
            border: Color::Rgb(30, 58, 138),
            selection: Color::Rgb(30, 64, 175),
            error: Color::Rgb(252, 165, 165),
            success: Color::Rgb(134, 239, 172),
            warning: Color::Rgb(253, 224, 71),
            muted: Color::Rgb(147, 164, 196),
        }
    }

    fn paper() -> Self {
        Self {
            bg: Color::Rgb(250, 246, 238),
            fg: Color::Rgb(60, 52, 42),
            accent: Color::Rgb(37, 99, 235),
            border: Color::Rgb(226, 216, 200),
            selection: Color::Rgb(238, 228, 210),
            error: Color::Rgb(185, 28, 28),
            success: Color::Rgb(21, 128, 61),
            warning: Color::Rgb(180, 83, 9),
            muted: Color::Rgb(140, 128, 112),
        }
    }

    fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Cyan,
            border: Color::Gray,
            selection: Color::DarkGray,
            error: Color::LightRed,
            success: Color::LightGreen,
            warning: Color::LightYellow,
            muted: Color::Gray,
        }
    }

    // style helpers
    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Badge colour for a risk level.
    pub fn risk(&self, risk: RiskScore) -> Style {
        let color = match risk {
            RiskScore::Low => self.success,
            RiskScore::Medium => self.warning,
            RiskScore::High => self.error,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
