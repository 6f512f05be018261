use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};

use crate::render::SectionKind;
use crate::tier::Tier;

/// Styles for the results and error panels.
pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::Cyan;
    pub const BORDER: Color = Color::DarkGray;
    pub const DONE: Color = Color::Green;
    pub const SUMMARY: Color = Color::Yellow;
    pub const ERROR_BG: Color = Color::Red;

    /// Top tiers read green, bottom tiers red.
    pub fn tier_color(tier: Tier) -> Color {
        match tier {
            Tier::Top => Color::Green,
            Tier::High => Color::LightGreen,
            Tier::Mid => Color::Blue,
            Tier::Low => Color::LightRed,
            Tier::Bottom => Color::Red,
        }
    }

    pub fn heading(kind: SectionKind) -> Style {
        let color = match kind {
            SectionKind::Variations => Self::ACCENT,
            SectionKind::Tier(tier) => Self::tier_color(tier),
            SectionKind::Summary => Self::SUMMARY,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn item(kind: SectionKind) -> Style {
        match kind {
            SectionKind::Summary => Style::default().add_modifier(Modifier::ITALIC),
            SectionKind::Variations | SectionKind::Tier(_) => Style::default(),
        }
    }

    pub fn done_banner() -> Line<'static> {
        Line::styled(
            "생성 완료!",
            Style::default().fg(Self::DONE).add_modifier(Modifier::BOLD),
        )
    }

    /// Rounded panel; the focused one gets the accent border.
    pub fn panel<'a>(title: &str, focused: bool) -> Block<'a> {
        let border = if focused { Self::ACCENT } else { Self::BORDER };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Line::styled(
                format!(" {title} "),
                Style::default().fg(border).add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Left)
    }

    /// `key` as a chip followed by what it does.
    pub fn key_hint(key: &str, action: &str) -> [Span<'static>; 2] {
        [
            Span::styled(
                format!(" {key} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(Self::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {action}  ")),
        ]
    }

    pub fn error_line(message: &str) -> Line<'static> {
        Line::styled(
            message.to_string(),
            Style::default().fg(Color::White).bg(Self::ERROR_BG),
        )
    }
}
