use super::{Component, EventResult};
use crate::state::{AppState, Screen};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct StatusBar;

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    fn get_help_text(state: &AppState) -> &'static str {
        match &state.screen {
            Screen::Start => "Enter: run the test | q: quit",
            Screen::CollectCount(_) => "Enter: validate | Esc: back | Ctrl+C: quit",
            Screen::ShowResult(view) if view.export_prompt.is_some() => {
                "Enter: save | Esc: cancel"
            }
            Screen::ShowResult(_) => "s: export chart | n: new run | q/Esc: close",
        }
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let content = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("Error: ", Style::default().fg(Color::Red)),
                Span::raw(error.as_str()),
            ])
        } else if let Some(status) = &state.status_message {
            Line::from(Span::styled(
                status.as_str(),
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from(Span::styled(
                Self::get_help_text(state),
                Style::default().fg(Color::DarkGray),
            ))
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}
