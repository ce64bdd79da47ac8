use crate::components::{Component, EventResult};
use crate::state::{AppState, ScreenAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::ScreenView;
use crate::components::modal::centered_rect;

pub struct StartScreen;

impl Default for StartScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl StartScreen {
    pub fn new() -> Self {
        Self
    }

    fn dataset_lines(state: &AppState) -> Vec<Line<'static>> {
        let dataset = &state.dataset;
        let range = match (dataset.first_date, dataset.last_date) {
            (Some(first), Some(last)) => format!("{first} to {last}"),
            _ => "-".to_string(),
        };

        vec![
            Line::from(vec![
                Span::styled("Data file: ", Style::default().fg(Color::DarkGray)),
                Span::raw(dataset.source.display().to_string()),
            ]),
            Line::from(vec![
                Span::styled("Tickers:   ", Style::default().fg(Color::DarkGray)),
                Span::raw(dataset.tickers.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Dates:     ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{} ({range})", dataset.dates)),
            ]),
        ]
    }
}

impl Component for StartScreen {
    fn handle_key(&mut self, key: KeyEvent, _state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Enter => EventResult::Action(ScreenAction::Begin),
            KeyCode::Char('q') | KeyCode::Esc => EventResult::Exit,
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let panel = centered_rect(64, 12, area);

        let mut lines = vec![
            Line::from(Span::styled(
                "How does diversification reduce portfolio risk?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(Self::dataset_lines(state));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Press "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" to run the test"),
        ]));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.title()));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, panel);
    }
}

impl ScreenView for StartScreen {
    fn title(&self) -> &str {
        "Portfolio Variance"
    }
}
