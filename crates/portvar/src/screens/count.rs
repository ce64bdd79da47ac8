use crate::components::{Component, EventResult};
use crate::state::{AppState, ScreenAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::ScreenView;
use crate::components::modal::centered_rect;

pub struct CountScreen;

impl Default for CountScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CountScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Component for CountScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Enter => return EventResult::Action(ScreenAction::Submit),
            KeyCode::Esc => return EventResult::Action(ScreenAction::Back),
            _ => {}
        }

        let Some(form) = state.screen.count_form_mut() else {
            return EventResult::NotHandled;
        };
        if form.input.handle_key(key) {
            form.error = None;
            EventResult::Handled
        } else {
            EventResult::NotHandled
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let crate::state::Screen::CollectCount(form) = &state.screen else {
            return;
        };

        let panel = centered_rect(60, 9, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.title()));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Prompt
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Input
                Constraint::Length(1), // Spacer
                Constraint::Min(1),    // Validation message
            ])
            .split(inner);

        let prompt = Line::from(vec![
            Span::raw("Number of tickers "),
            Span::styled(
                format!("(1-{})", state.dataset.tickers),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(prompt), chunks[0]);

        let input = form.input.render_line(chunks[2].width as usize, "> ");
        frame.render_widget(Paragraph::new(input), chunks[2]);

        if let Some(error) = &form.error {
            let message = Paragraph::new(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            )));
            frame.render_widget(message, chunks[4]);
        }
    }
}

impl ScreenView for CountScreen {
    fn title(&self) -> &str {
        "Select Tickers"
    }
}
