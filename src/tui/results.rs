use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::render::{COPY_BLOCK_TITLE, Presentation};

use super::Theme;
use super::screen::with_screen;

/// Lines of the results panel: each section header followed by its items.
pub fn result_lines(presentation: &Presentation) -> Vec<Line<'static>> {
    let mut lines = vec![Theme::done_banner()];
    for section in &presentation.sections {
        lines.push(Line::default());
        lines.push(Line::styled(section.title.clone(), Theme::heading(section.kind)));
        let item_style = Theme::item(section.kind);
        for item in &section.items {
            lines.push(Line::styled(format!("  {item}"), item_style));
        }
    }
    lines
}

fn help_line() -> Line<'static> {
    let spans: Vec<Span<'static>> = [("↑/↓", "스크롤"), ("Tab", "패널 전환"), ("q", "닫기")]
        .into_iter()
        .flat_map(|(key, action)| Theme::key_hint(key, action))
        .collect();
    Line::from(spans)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Focus {
    Results,
    CopyBlock,
}

/// Shows the structured results and the copy block side by side until the
/// user closes the panel.
pub fn show_results(title: &str, presentation: &Presentation) -> Result<()> {
    let results = result_lines(presentation);
    let copy_lines: Vec<Line<'static>> = presentation
        .copy_block
        .lines()
        .map(|line| Line::raw(line.to_string()))
        .collect();

    let mut focus = Focus::Results;
    let mut scroll = [0u16; 2];

    with_screen(|terminal| {
        loop {
            terminal.draw(|frame| {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(3), Constraint::Length(1)])
                    .split(frame.area());
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(rows[0]);

                let results_widget = Paragraph::new(results.clone())
                    .block(Theme::panel(title, focus == Focus::Results))
                    .wrap(Wrap { trim: false })
                    .scroll((scroll[0], 0));
                frame.render_widget(results_widget, columns[0]);

                let copy_widget = Paragraph::new(copy_lines.clone())
                    .block(Theme::panel(COPY_BLOCK_TITLE, focus == Focus::CopyBlock))
                    .wrap(Wrap { trim: false })
                    .scroll((scroll[1], 0));
                frame.render_widget(copy_widget, columns[1]);

                frame.render_widget(Paragraph::new(help_line()), rows[1]);
            })?;

            if event::poll(Duration::from_millis(250))?
                && let Event::Key(key) = event::read()?
            {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let idx = match focus {
                    Focus::Results => 0,
                    Focus::CopyBlock => 1,
                };
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Tab => {
                        focus = match focus {
                            Focus::Results => Focus::CopyBlock,
                            Focus::CopyBlock => Focus::Results,
                        };
                    }
                    KeyCode::Up => scroll[idx] = scroll[idx].saturating_sub(1),
                    KeyCode::Down => scroll[idx] = scroll[idx].saturating_add(1),
                    KeyCode::PageUp => scroll[idx] = scroll[idx].saturating_sub(10),
                    KeyCode::PageDown => scroll[idx] = scroll[idx].saturating_add(10),
                    KeyCode::Home => scroll[idx] = 0,
                    _ => {}
                }
            }
        }
        Ok(())
    })
}
