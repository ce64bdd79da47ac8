//! Single-line text field state and rendering.
//!
//! The cursor is a char index, so editing stays valid for non-ASCII paths.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor_pos: usize,
}

impl TextInput {
    /// Create an input holding `value` with the cursor at the end
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor_pos: value.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor_pos);
        self.value.insert(idx, c);
        self.cursor_pos += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let idx = self.byte_index(self.cursor_pos);
            self.value.remove(idx);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.len() {
            let idx = self.byte_index(self.cursor_pos);
            self.value.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_pos < self.len() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.len();
    }

    /// Apply an editing key. Returns false for keys that are not edits.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(c)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.move_cursor_home(),
            KeyCode::End => self.move_cursor_end(),
            _ => return false,
        }
        true
    }

    /// Render the visible part of the value with a block cursor.
    pub fn render_line(&self, width: usize, prefix: &str) -> Line<'static> {
        let view = calculate_scroll(&self.value, self.cursor_pos, width);
        render_cursor_line(&view.display_value, view.cursor_pos, prefix)
    }
}

/// Render a line of text with a visible cursor at the specified position.
///
/// The cursor is shown as a white background block.
pub fn render_cursor_line(display_value: &str, cursor_pos: usize, prefix: &str) -> Line<'static> {
    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
    let mut spans = Vec::new();

    if !prefix.is_empty() {
        spans.push(Span::raw(prefix.to_string()));
    }

    let chars: Vec<char> = display_value.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i == cursor_pos {
            spans.push(Span::styled(c.to_string(), cursor_style));
        } else {
            spans.push(Span::raw(c.to_string()));
        }
    }

    if cursor_pos >= chars.len() {
        spans.push(Span::styled(" ", cursor_style));
    }

    Line::from(spans)
}

/// Visible window of a value wider than its container
pub struct ScrolledView {
    pub display_value: String,
    /// Cursor position within `display_value`
    pub cursor_pos: usize,
}

/// Keep the cursor centered when `value` does not fit in `max_width`.
pub fn calculate_scroll(value: &str, cursor_pos: usize, max_width: usize) -> ScrolledView {
    let input_width = max_width.saturating_sub(2);
    let chars: Vec<char> = value.chars().collect();

    if chars.len() <= input_width {
        return ScrolledView {
            display_value: value.to_string(),
            cursor_pos,
        };
    }

    let start = cursor_pos.saturating_sub(input_width / 2);
    let end = (start + input_width).min(chars.len());
    let start = end.saturating_sub(input_width);

    ScrolledView {
        display_value: chars[start..end].iter().collect(),
        cursor_pos: cursor_pos - start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut TextInput, code: KeyCode) -> bool {
        input.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_editing_keys() {
        let mut input = TextInput::default();
        for c in "125".chars() {
            press(&mut input, KeyCode::Char(c));
        }
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Backspace);
        press(&mut input, KeyCode::Char('0'));
        assert_eq!(input.value(), "105");
        assert_eq!(input.cursor_pos, 2);

        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.value(), "05");

        press(&mut input, KeyCode::End);
        press(&mut input, KeyCode::Right);
        assert_eq!(input.cursor_pos, 2);

        assert!(!press(&mut input, KeyCode::Enter));
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut input = TextInput::new("7");
        let handled = input.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!handled);
        assert_eq!(input.value(), "7");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new("café.png");
        input.move_cursor_home();
        for _ in 0..4 {
            input.move_cursor_right();
        }
        input.backspace();
        assert_eq!(input.value(), "caf.png");
        input.insert_char('é');
        assert_eq!(input.value(), "café.png");
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let value = "/very/long/path/to/an/export/file.png";
        let view = calculate_scroll(value, value.len(), 12);
        assert_eq!(view.display_value.chars().count(), 10);
        assert!(value.ends_with(&view.display_value));
        assert_eq!(view.cursor_pos, 10);

        let view = calculate_scroll("short", 2, 40);
        assert_eq!(view.display_value, "short");
        assert_eq!(view.cursor_pos, 2);
    }

    #[test]
    fn test_cursor_block_at_end() {
        let line = render_cursor_line("ab", 2, " ");
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.spans[3].content, " ");
    }
}
