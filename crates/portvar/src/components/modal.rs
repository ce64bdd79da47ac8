//! Overlay helpers for the export prompt.

use std::rc::Rc;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Layout of a rendered modal
pub struct ModalFrame {
    /// The inner area (inside the border)
    pub inner: Rect,
    pub chunks: Rc<[Rect]>,
}

/// Clear a centered area, draw a titled border and split its inside.
pub fn render_modal_frame(
    frame: &mut Frame,
    title: &str,
    width: u16,
    height: u16,
    border_color: Color,
    constraints: &[Constraint],
) -> ModalFrame {
    let modal_area = centered_rect(width, height, frame.area());

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    ModalFrame { inner, chunks }
}

/// Builder for key hints: colored keys followed by plain descriptions.
///
/// ```ignore
/// let help = HelpText::new()
///     .key("[Enter]", Color::Green, "Save")
///     .key("[Esc]", Color::Yellow, "Cancel")
///     .build();
/// ```
#[derive(Default)]
pub struct HelpText {
    items: Vec<(String, Color, String)>,
}

impl HelpText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: &str, color: Color, description: &str) -> Self {
        self.items
            .push((key.to_string(), color, description.to_string()));
        self
    }

    pub fn line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (key, color, description)) in self.items.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(key.clone(), Style::default().fg(*color)));
            spans.push(Span::raw(format!(" {description}")));
        }
        Line::from(spans)
    }

    pub fn build(self) -> Paragraph<'static> {
        Paragraph::new(self.line())
    }
}
