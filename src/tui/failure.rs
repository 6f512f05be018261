use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::Line,
    widgets::{Paragraph, Wrap},
};

use super::Theme;
use super::screen::with_screen;

const DISMISS_HINT: &str = "아무 키나 누르면 닫힙니다.";

fn failure_lines(messages: &[String]) -> Vec<Line<'static>> {
    messages
        .iter()
        .map(|message| Theme::error_line(message))
        .chain([Line::default(), Line::raw(DISMISS_HINT)])
        .collect()
}

/// Shows a failed request's messages until any key is pressed.
pub fn show_failure(messages: &[String]) -> Result<()> {
    let lines = failure_lines(messages);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);

    with_screen(|terminal| {
        loop {
            terminal.draw(|frame| {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(height), Constraint::Min(0)])
                    .split(frame.area());
                let paragraph = Paragraph::new(lines.clone())
                    .block(Theme::panel("오류", true))
                    .wrap(Wrap { trim: false });
                frame.render_widget(paragraph, rows[0]);
            })?;

            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                break;
            }
        }
        Ok(())
    })
}
