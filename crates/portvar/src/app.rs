use std::io;
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::analyzer::Analyzer;
use crate::components::{Component, EventResult, status_bar::StatusBar};
use crate::config::AppConfig;
use crate::export::{ChartSize, export_curve};
use crate::screens::{
    ScreenView, count::CountScreen, result::ResultScreen, start::StartScreen,
};
use crate::state::{AppState, Screen, ScreenAction};

pub struct App {
    state: AppState,
    analyzer: Box<dyn Analyzer>,
    status_bar: StatusBar,
    start_screen: StartScreen,
    count_screen: CountScreen,
    result_screen: ResultScreen,
}

impl App {
    pub fn new(analyzer: Box<dyn Analyzer>, config: &AppConfig) -> Self {
        let size = ChartSize {
            width: config.export_width,
            height: config.export_height,
        };
        let state = AppState::new(
            analyzer.dataset().clone(),
            config.default_export_path(),
            size,
        );

        Self {
            state,
            analyzer,
            status_bar: StatusBar::new(),
            start_screen: StartScreen::new(),
            count_screen: CountScreen::new(),
            result_screen: ResultScreen::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl App {
    /// runs the application's main loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        while !self.state.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(0),    // Content
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        self.render_title(frame, chunks[0]);
        self.render_active_screen(frame, chunks[1]);
        self.status_bar.render(frame, chunks[2], &self.state);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = match self.state.screen {
            Screen::Start => self.start_screen.title(),
            Screen::CollectCount(_) => self.count_screen.title(),
            Screen::ShowResult(_) => self.result_screen.title(),
        };
        let line = Line::from(vec![
            Span::styled(
                " portvar ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {title}")),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_active_screen(&mut self, frame: &mut Frame, area: Rect) {
        match self.state.screen {
            Screen::Start => self.start_screen.render(frame, area, &self.state),
            Screen::CollectCount(_) => self.count_screen.render(frame, area, &self.state),
            Screen::ShowResult(_) => self.result_screen.render(frame, area, &self.state),
        }
    }

    fn handle_events(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    pub(crate) fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.state.exit = true;
            return;
        }

        let result = match self.state.screen {
            Screen::Start => self.start_screen.handle_key(key_event, &mut self.state),
            Screen::CollectCount(_) => self.count_screen.handle_key(key_event, &mut self.state),
            Screen::ShowResult(_) => self.result_screen.handle_key(key_event, &mut self.state),
        };

        match result {
            EventResult::Exit => self.state.exit = true,
            EventResult::Action(action) => self.handle_action(action),
            EventResult::Handled | EventResult::NotHandled => {}
        }
    }

    fn handle_action(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::Begin => self.state.transition(Screen::begin),
            ScreenAction::Submit => {
                let analyzer = self.analyzer.as_mut();
                self.state.transition(|screen| screen.submit(analyzer));
            }
            ScreenAction::Back => self.state.transition(Screen::back),
            ScreenAction::NewRun => self.state.transition(Screen::new_run),
            ScreenAction::Export(path) => self.export(path),
        }
    }

    fn export(&mut self, path: PathBuf) {
        let size = self.state.export_size;
        let Some(view) = self.state.screen.result_view_mut() else {
            return;
        };

        match export_curve(&view.report.curve, &path, size) {
            Ok(format) => {
                view.export_prompt = None;
                self.state
                    .set_status(format!("Saved {format} chart to {}", path.display()));
                self.state.export_path = path;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "export failed");
                self.state.set_error(e.to_string());
            }
        }
    }
}
