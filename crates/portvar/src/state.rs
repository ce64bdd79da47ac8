//! Shell state
//!
//! The three screens form an explicit state machine:
//!
//! ```text
//! Start --begin--> CollectCount --submit--> ShowResult
//!   ^                 |    ^                    |
//!   +------back-------+    +------new_run-------+
//! ```
//!
//! A rejected submit stays on `CollectCount` and records why. Closing the
//! result screen ends the app and is handled through [`AppState::exit`].

use std::path::PathBuf;

use portvar_core::AnalysisReport;
use portvar_core::analysis::parse_ticker_count;

use crate::analyzer::{Analyzer, DatasetSummary};
use crate::components::text_input::TextInput;
use crate::export::ChartSize;

/// Count entry form on the second screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountForm {
    pub input: TextInput,
    /// Validation message from the last rejected submit
    pub error: Option<String>,
}

impl CountForm {
    pub fn with_value(value: &str) -> Self {
        Self {
            input: TextInput::new(value),
            error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResultView {
    pub report: AnalysisReport,
    /// Open while the user is typing an export path
    pub export_prompt: Option<TextInput>,
}

impl ResultView {
    pub fn new(report: AnalysisReport) -> Self {
        Self {
            report,
            export_prompt: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum Screen {
    #[default]
    Start,
    CollectCount(CountForm),
    ShowResult(Box<ResultView>),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Start => "start",
            Screen::CollectCount(_) => "collect-count",
            Screen::ShowResult(_) => "show-result",
        }
    }

    /// Start -> CollectCount
    pub fn begin(self) -> Screen {
        match self {
            Screen::Start => Screen::CollectCount(CountForm::default()),
            other => other,
        }
    }

    /// Validate the typed count and run the analysis.
    ///
    /// On success the result screen opens. Any failure keeps the form, with
    /// the input intact and the message in [`CountForm::error`].
    pub fn submit(self, analyzer: &mut dyn Analyzer) -> Screen {
        let mut form = match self {
            Screen::CollectCount(form) => form,
            other => return other,
        };

        let available = analyzer.dataset().tickers;
        let outcome = parse_ticker_count(form.input.value(), available)
            .map_err(|e| e.to_string())
            .and_then(|n| analyzer.analyze(n).map_err(|e| e.to_string()));

        match outcome {
            Ok(report) => {
                tracing::info!(
                    tickers = report.selection.len(),
                    points = report.curve.len(),
                    "showing variance curve"
                );
                Screen::ShowResult(Box::new(ResultView::new(report)))
            }
            Err(message) => {
                tracing::debug!(input = form.input.value(), %message, "count rejected");
                form.error = Some(message);
                Screen::CollectCount(form)
            }
        }
    }

    /// CollectCount -> Start
    pub fn back(self) -> Screen {
        match self {
            Screen::CollectCount(_) => Screen::Start,
            other => other,
        }
    }

    /// ShowResult -> CollectCount, pre-filled with the previous count
    pub fn new_run(self) -> Screen {
        match self {
            Screen::ShowResult(view) => {
                Screen::CollectCount(CountForm::with_value(&view.report.selection.len().to_string()))
            }
            other => other,
        }
    }

    pub fn count_form_mut(&mut self) -> Option<&mut CountForm> {
        match self {
            Screen::CollectCount(form) => Some(form),
            _ => None,
        }
    }

    pub fn result_view(&self) -> Option<&ResultView> {
        match self {
            Screen::ShowResult(view) => Some(view),
            _ => None,
        }
    }

    pub fn result_view_mut(&mut self) -> Option<&mut ResultView> {
        match self {
            Screen::ShowResult(view) => Some(view),
            _ => None,
        }
    }
}

/// Requests from screens that need the app to act on their behalf
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    Begin,
    Submit,
    Back,
    NewRun,
    Export(PathBuf),
}

#[derive(Debug, Default)]
pub struct AppState {
    pub screen: Screen,
    pub dataset: DatasetSummary,
    pub exit: bool,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    /// Pre-filled in the export prompt
    pub export_path: PathBuf,
    pub export_size: ChartSize,
}

impl AppState {
    pub fn new(dataset: DatasetSummary, export_path: PathBuf, export_size: ChartSize) -> Self {
        Self {
            dataset,
            export_path,
            export_size,
            ..Default::default()
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.status_message = None;
        self.error_message = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_status(&mut self, message: String) {
        self.error_message = None;
        self.status_message = Some(message);
    }

    /// Apply a transition to the current screen.
    pub fn transition(&mut self, f: impl FnOnce(Screen) -> Screen) {
        let from = self.screen.name();
        self.screen = f(std::mem::take(&mut self.screen));
        let to = self.screen.name();
        if from != to {
            tracing::info!(from, to, "screen transition");
            self.error_message = None;
            self.status_message = None;
        }
    }
}
