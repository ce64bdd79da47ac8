use std::path::PathBuf;

use crate::components::modal::{HelpText, render_modal_frame};
use crate::components::text_input::TextInput;
use crate::components::{Component, EventResult};
use crate::state::{AppState, ResultView, Screen, ScreenAction};
use crate::util::format::{format_axis_value, format_percentage, format_variance};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
};

use super::ScreenView;

pub struct ResultScreen;

impl Default for ResultScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultScreen {
    pub fn new() -> Self {
        Self
    }

    fn handle_prompt_key(key: KeyEvent, prompt: &mut Option<TextInput>) -> EventResult {
        if key.code == KeyCode::Esc {
            *prompt = None;
            return EventResult::Handled;
        }
        let Some(input) = prompt.as_mut() else {
            return EventResult::NotHandled;
        };
        match key.code {
            KeyCode::Enter => {
                let path = input.value().trim();
                if path.is_empty() {
                    EventResult::Handled
                } else {
                    EventResult::Action(ScreenAction::Export(PathBuf::from(path)))
                }
            }
            _ if input.handle_key(key) => EventResult::Handled,
            _ => EventResult::NotHandled,
        }
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect, view: &ResultView) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" VARIANCE VS. NUMBER OF TICKERS ");

        let curve = &view.report.curve;
        if curve.is_empty() {
            frame.render_widget(Paragraph::new("No data to display").block(block), area);
            return;
        }

        let data: Vec<(f64, f64)> = curve.points().map(|(k, v)| (k as f64, v)).collect();

        let (x_min, x_max) = if curve.len() == 1 {
            (0.5_f64, 1.5_f64)
        } else {
            (1.0, curve.len() as f64)
        };
        let y_max = match curve.max() {
            m if m > 0.0 => m * 1.1,
            _ => 1.0,
        };

        let dataset = Dataset::default()
            .name("equal-weight variance")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&data);

        let x_labels = vec![
            Span::raw(format!("{:.0}", x_min.ceil())),
            Span::raw(format!("{:.0}", ((x_min + x_max) / 2.0).round())),
            Span::raw(format!("{:.0}", x_max.floor())),
        ];
        let y_labels = vec![
            Span::raw(format_axis_value(0.0)),
            Span::raw(format_axis_value(y_max / 2.0)),
            Span::raw(format_axis_value(y_max)),
        ];

        let x_axis = Axis::default()
            .title("Number of tickers".dark_gray())
            .bounds([x_min, x_max])
            .labels(x_labels);

        let y_axis = Axis::default()
            .title("Portfolio variance".dark_gray())
            .bounds([0.0, y_max])
            .labels(y_labels);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis);

        frame.render_widget(chart, area);
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect, view: &ResultView) {
        let report = &view.report;
        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
        let value_or_dash =
            |v: Option<f64>, f: fn(f64) -> String| v.map(f).unwrap_or_else(|| "-".to_string());

        let mut lines = vec![
            Line::from(vec![
                label("Tickers:       "),
                Span::raw(report.selection.len().to_string()),
            ]),
            Line::from(vec![
                label("Return lag:    "),
                Span::raw(format!("{} periods", report.return_lag)),
            ]),
            Line::from(vec![
                label("Observations:  "),
                Span::raw(format!(
                    "{} returns / {} dates",
                    report.return_rows, report.price_rows
                )),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Single asset:  "),
                Span::raw(value_or_dash(report.curve.first(), format_variance)),
            ]),
            Line::from(vec![
                label("Full portfolio:"),
                Span::raw(format!(" {}", value_or_dash(report.curve.last(), format_variance))),
            ]),
            Line::from(vec![
                label("Full / single: "),
                Span::styled(
                    value_or_dash(report.curve.diversification_ratio(), format_percentage),
                    Style::default().fg(Color::Green),
                ),
            ]),
            Line::from(""),
            Line::from(label("Draw order:")),
        ];

        let tickers = report
            .selection
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(Line::from(tickers));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" SUMMARY "))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_export_prompt(&self, frame: &mut Frame, input: &TextInput) {
        let mf = render_modal_frame(
            frame,
            "Export Chart",
            70,
            7,
            Color::Cyan,
            &[
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ],
        );

        frame.render_widget(
            Paragraph::new("Save as (.png, .pdf, .svg or .html):"),
            mf.chunks[0],
        );
        frame.render_widget(
            Paragraph::new(input.render_line(mf.inner.width as usize, " ")),
            mf.chunks[1],
        );
        let help = HelpText::new()
            .key("[Enter]", Color::Green, "Save")
            .key("[Esc]", Color::Yellow, "Cancel")
            .build();
        frame.render_widget(help, mf.chunks[3]);
    }
}

impl Component for ResultScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        let default_path = state.export_path.display().to_string();
        let Some(view) = state.screen.result_view_mut() else {
            return EventResult::NotHandled;
        };

        if view.export_prompt.is_some() {
            return Self::handle_prompt_key(key, &mut view.export_prompt);
        }

        match key.code {
            KeyCode::Char('s') => {
                view.export_prompt = Some(TextInput::new(&default_path));
                EventResult::Handled
            }
            KeyCode::Char('n') => EventResult::Action(ScreenAction::NewRun),
            KeyCode::Char('q') | KeyCode::Esc => EventResult::Exit,
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Screen::ShowResult(view) = &state.screen else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        self.render_chart(frame, chunks[0], view);
        self.render_summary(frame, chunks[1], view);

        if let Some(input) = &view.export_prompt {
            self.render_export_prompt(frame, input);
        }
    }
}

impl ScreenView for ResultScreen {
    fn title(&self) -> &str {
        "Results"
    }
}
